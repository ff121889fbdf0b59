//! Application screens
//!
//! Descriptors for the screen implementations the view resolver can hand
//! out. Several destinations share one screen (the legal pages, the auth
//! forms, the subscription pages); each descriptor carries only what its
//! screen needs to render.

use serde::{Deserialize, Serialize};

use crate::navigation::destination::{ExportFormat, ShareType};

/// Number of onboarding steps
pub const ONBOARDING_STEPS: u8 = 4;

/// Forms shown by the authentication shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthForm {
    /// Email and password login
    Login,
    /// Account creation
    Signup,
    /// Password reset request
    PasswordReset,
}

/// Static legal documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegalDocument {
    /// Privacy policy
    PrivacyPolicy,
    /// Terms of service
    TermsOfService,
}

/// Pages of the subscription screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPage {
    /// Plans and pricing
    Plans,
    /// Active subscription management
    Manage,
}

/// A screen implementation and its parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    /// Home dashboard cards
    Dashboard,
    /// Profile page
    Profile {
        /// Profile owner
        user_id: String,
        /// Whether the signed-in user is looking at their own profile
        is_own_profile: bool,
    },
    /// App settings
    Settings,
    /// Notification inbox
    Notifications,
    /// Search
    Search {
        /// Prefilled query
        query: Option<String>,
    },
    /// List of reports
    ReportList,
    /// Report viewer
    Report {
        /// Report identifier
        report_id: String,
        /// Subject of the report
        user_id: String,
    },
    /// Analytics charts for a user
    Analytics {
        /// User identifier
        user_id: String,
        /// Whether the charts are the signed-in user's own
        is_own_profile: bool,
    },
    /// Report export sheet
    Export {
        /// Report identifier
        report_id: String,
        /// Selected format
        format: ExportFormat,
    },
    /// Team insight charts
    TeamInsights {
        /// Team identifier
        team_id: String,
    },
    /// Career goals list
    Goals,
    /// Single goal
    Goal {
        /// Goal identifier
        goal_id: String,
    },
    /// Skill assessment questionnaire
    SkillAssessment {
        /// Skill identifier
        skill_id: String,
    },
    /// Learning path
    LearningPath {
        /// Path identifier
        path_id: String,
    },
    /// Achievements grid
    Achievements,
    /// Leaderboard
    Leaderboard,
    /// Feedback form
    FeedbackForm {
        /// Person receiving the feedback
        recipient_id: String,
    },
    /// Feedback history
    FeedbackHistory,
    /// AI recommendations feed
    Recommendations,
    /// AI coach chat
    Coach,
    /// Single AI insight
    Insight {
        /// Insight identifier
        insight_id: String,
    },
    /// Subscription pages
    Subscription {
        /// Page to show
        page: SubscriptionPage,
    },
    /// Paywall
    Paywall {
        /// Feature being unlocked
        feature: String,
    },
    /// Purchase confirmation
    PurchaseComplete {
        /// Purchased product
        product_id: String,
    },
    /// Onboarding carousel
    Onboarding {
        /// Step shown, clamped to the last step
        step: u8,
        /// Whether this is the last step
        is_last_step: bool,
    },
    /// Authentication forms
    Auth {
        /// Form to show
        form: AuthForm,
    },
    /// HR organization dashboard
    HrDashboard {
        /// Organization identifier
        org_id: String,
    },
    /// Employee directory
    Directory,
    /// Employee page
    Employee {
        /// Employee identifier
        employee_id: String,
    },
    /// Performance review
    Review {
        /// Review identifier
        review_id: String,
    },
    /// Team management
    TeamManagement {
        /// Team identifier
        team_id: String,
    },
    /// Content opened from a share link
    SharedContent {
        /// Kind of shared content
        share_type: ShareType,
        /// Identifier of the shared content
        id: String,
    },
    /// Connections list
    Connections {
        /// User identifier
        user_id: String,
    },
    /// Help center
    Help,
    /// About page
    About,
    /// Legal document viewer
    Legal {
        /// Document to show
        document: LegalDocument,
    },
    /// Contact support form
    ContactSupport,
}

impl Screen {
    /// Onboarding screen for a step, clamping out-of-range steps
    pub fn onboarding(step: u8) -> Self {
        let last = ONBOARDING_STEPS - 1;
        let step = step.min(last);
        Screen::Onboarding {
            step,
            is_last_step: step == last,
        }
    }

    /// Check if the screen loads remote data when shown
    pub fn loads_data(&self) -> bool {
        !matches!(
            self,
            Screen::Settings
                | Screen::Search { .. }
                | Screen::Export { .. }
                | Screen::FeedbackForm { .. }
                | Screen::Onboarding { .. }
                | Screen::Auth { .. }
                | Screen::Help
                | Screen::About
                | Screen::Legal { .. }
                | Screen::ContactSupport
        )
    }
}
