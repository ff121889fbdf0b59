//! View resolver
//!
//! Maps every destination to the screen that renders it. The match in
//! [`ViewResolver::screen_for`] has one arm per destination and no wildcard:
//! adding a destination without a screen does not compile.

use app_state::auth::AuthSnapshot;

use super::destination::Destination;
use super::stack::NavigatorView;
use crate::screens::{AuthForm, LegalDocument, Screen, SubscriptionPage};

/// A resolved screen with the dependencies it renders with
#[derive(Debug, Clone)]
pub struct ViewHandle {
    /// Destination that was resolved
    pub destination: Destination,
    /// Screen implementation and its parameters
    pub screen: Screen,
    /// Navigation bar title
    pub title: &'static str,
    /// Whether the destination requires authentication
    pub requires_auth: bool,
    /// Requires authentication and nobody is signed in
    pub locked: bool,
    /// Read-only navigation state
    pub navigator: NavigatorView,
    /// Authentication state at resolution time
    pub auth: AuthSnapshot,
}

/// Resolves destinations to screens
#[derive(Debug, Clone)]
pub struct ViewResolver {
    navigator: NavigatorView,
    auth: AuthSnapshot,
}

impl ViewResolver {
    /// Create a resolver injecting `navigator` and `auth` into every screen
    pub fn new(navigator: NavigatorView, auth: AuthSnapshot) -> Self {
        Self { navigator, auth }
    }

    /// Update the authentication state handed to screens
    pub fn set_auth(&mut self, auth: AuthSnapshot) {
        self.auth = auth;
    }

    /// Authentication state handed to screens
    pub fn auth(&self) -> &AuthSnapshot {
        &self.auth
    }

    /// Resolve a destination to its screen
    ///
    /// Does not touch navigation state.
    pub fn resolve(&self, destination: &Destination) -> ViewHandle {
        let requires_auth = destination.requires_auth();
        ViewHandle {
            destination: destination.clone(),
            screen: self.screen_for(destination),
            title: destination.title(),
            requires_auth,
            locked: requires_auth && !self.auth.is_authenticated,
            navigator: self.navigator.clone(),
            auth: self.auth.clone(),
        }
    }

    /// Resolve the displayed destination
    pub fn resolve_current(&self) -> Option<ViewHandle> {
        self.navigator.current().map(|d| self.resolve(&d))
    }

    /// Screen implementation for a destination
    pub fn screen_for(&self, destination: &Destination) -> Screen {
        match destination {
            // Core
            Destination::Dashboard => Screen::Dashboard,
            Destination::Profile { user_id } => Screen::Profile {
                user_id: user_id.clone(),
                is_own_profile: self.auth.is_user(user_id),
            },
            Destination::Settings => Screen::Settings,
            Destination::Notifications => Screen::Notifications,
            Destination::Search { query } => Screen::Search {
                query: query.clone(),
            },

            // Reports and analytics
            Destination::Reports => Screen::ReportList,
            Destination::ReportDetail { report_id, user_id } => Screen::Report {
                report_id: report_id.clone(),
                user_id: user_id.clone(),
            },
            Destination::Analytics { user_id } => Screen::Analytics {
                user_id: user_id.clone(),
                is_own_profile: self.auth.is_user(user_id),
            },
            Destination::ExportReport { report_id, format } => Screen::Export {
                report_id: report_id.clone(),
                format: *format,
            },
            Destination::TeamInsights { team_id } => Screen::TeamInsights {
                team_id: team_id.clone(),
            },

            // Career development
            Destination::CareerGoals => Screen::Goals,
            Destination::GoalDetail { goal_id } => Screen::Goal {
                goal_id: goal_id.clone(),
            },
            Destination::SkillAssessment { skill_id } => Screen::SkillAssessment {
                skill_id: skill_id.clone(),
            },
            Destination::LearningPath { path_id } => Screen::LearningPath {
                path_id: path_id.clone(),
            },
            Destination::Achievements => Screen::Achievements,
            Destination::Leaderboard => Screen::Leaderboard,
            Destination::FeedbackForm { recipient_id } => Screen::FeedbackForm {
                recipient_id: recipient_id.clone(),
            },
            Destination::FeedbackHistory => Screen::FeedbackHistory,

            // AI
            Destination::AiRecommendations => Screen::Recommendations,
            Destination::AiCoach => Screen::Coach,
            Destination::CareerInsight { insight_id } => Screen::Insight {
                insight_id: insight_id.clone(),
            },

            // Subscription
            Destination::Subscription => Screen::Subscription {
                page: SubscriptionPage::Plans,
            },
            Destination::Paywall { feature } => Screen::Paywall {
                feature: feature.clone(),
            },
            Destination::ManageSubscription => Screen::Subscription {
                page: SubscriptionPage::Manage,
            },
            Destination::PurchaseComplete { product_id } => Screen::PurchaseComplete {
                product_id: product_id.clone(),
            },

            // Onboarding and auth
            Destination::Onboarding { step } => Screen::onboarding(*step),
            Destination::Login => Screen::Auth {
                form: AuthForm::Login,
            },
            Destination::Signup => Screen::Auth {
                form: AuthForm::Signup,
            },
            Destination::PasswordReset => Screen::Auth {
                form: AuthForm::PasswordReset,
            },

            // HR and enterprise
            Destination::HrDashboard { org_id } => Screen::HrDashboard {
                org_id: org_id.clone(),
            },
            Destination::EmployeeDirectory => Screen::Directory,
            Destination::EmployeeDetail { employee_id } => Screen::Employee {
                employee_id: employee_id.clone(),
            },
            Destination::PerformanceReview { review_id } => Screen::Review {
                review_id: review_id.clone(),
            },
            Destination::TeamManagement { team_id } => Screen::TeamManagement {
                team_id: team_id.clone(),
            },

            // Social
            Destination::Share { share_type, id } => Screen::SharedContent {
                share_type: *share_type,
                id: id.clone(),
            },
            Destination::Connections { user_id } => Screen::Connections {
                user_id: user_id.clone(),
            },

            // Support
            Destination::Help => Screen::Help,
            Destination::About => Screen::About,
            Destination::PrivacyPolicy => Screen::Legal {
                document: LegalDocument::PrivacyPolicy,
            },
            Destination::TermsOfService => Screen::Legal {
                document: LegalDocument::TermsOfService,
            },
            Destination::ContactSupport => Screen::ContactSupport,
        }
    }
}
