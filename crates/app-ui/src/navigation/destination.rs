//! Destination catalog
//!
//! Every screen the app can navigate to, with the identifiers it needs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Title used for destinations without a screen-specific title
pub const APP_NAME: &str = "Ascend";

// =============================================================================
// Payload Enums
// =============================================================================

/// Format of a report export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// PDF document
    Pdf,
    /// Comma-separated values
    Csv,
    /// JSON document
    Json,
    /// Sent by email
    Email,
}

impl ExportFormat {
    /// Wire name of this format
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Email => "email",
        }
    }

    /// Get all formats in order
    pub fn all() -> [ExportFormat; 4] {
        [
            ExportFormat::Pdf,
            ExportFormat::Csv,
            ExportFormat::Json,
            ExportFormat::Email,
        ]
    }
}

impl FromStr for ExportFormat {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pdf" => Ok(ExportFormat::Pdf),
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "email" => Ok(ExportFormat::Email),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of content being shared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareType {
    /// A user profile
    Profile,
    /// An analytics report
    Report,
    /// An earned achievement
    Achievement,
    /// A career goal
    Goal,
    /// An AI-generated insight
    Insight,
}

impl ShareType {
    /// Wire name of this share type
    pub fn as_str(&self) -> &'static str {
        match self {
            ShareType::Profile => "profile",
            ShareType::Report => "report",
            ShareType::Achievement => "achievement",
            ShareType::Goal => "goal",
            ShareType::Insight => "insight",
        }
    }

    /// Get all share types in order
    pub fn all() -> [ShareType; 5] {
        [
            ShareType::Profile,
            ShareType::Report,
            ShareType::Achievement,
            ShareType::Goal,
            ShareType::Insight,
        ]
    }
}

impl FromStr for ShareType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "profile" => Ok(ShareType::Profile),
            "report" => Ok(ShareType::Report),
            "achievement" => Ok(ShareType::Achievement),
            "goal" => Ok(ShareType::Goal),
            "insight" => Ok(ShareType::Insight),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl fmt::Display for ShareType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A payload enum value that is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown value: {0}")]
pub struct UnknownVariant(pub String);

// =============================================================================
// Destinations
// =============================================================================

/// Every screen the app can navigate to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "destination", content = "params")]
pub enum Destination {
    // Core
    /// Home dashboard
    Dashboard,
    /// User profile
    Profile {
        /// User identifier
        user_id: String,
    },
    /// App settings
    Settings,
    /// Notification inbox
    Notifications,
    /// Search
    Search {
        /// Prefilled query
        #[serde(skip_serializing_if = "Option::is_none")]
        query: Option<String>,
    },

    // Reports and analytics
    /// Report list
    Reports,
    /// Single report about a user
    ReportDetail {
        /// Report identifier
        report_id: String,
        /// Subject of the report
        user_id: String,
    },
    /// Analytics for a user
    Analytics {
        /// User identifier
        user_id: String,
    },
    /// Export a report
    ExportReport {
        /// Report identifier
        report_id: String,
        /// Export format
        format: ExportFormat,
    },
    /// Team-level insights
    TeamInsights {
        /// Team identifier
        team_id: String,
    },

    // Career development
    /// Career goals list
    CareerGoals,
    /// Single career goal
    GoalDetail {
        /// Goal identifier
        goal_id: String,
    },
    /// Skill self-assessment
    SkillAssessment {
        /// Skill identifier
        skill_id: String,
    },
    /// Learning path
    LearningPath {
        /// Path identifier
        path_id: String,
    },
    /// Earned achievements
    Achievements,
    /// Gamification leaderboard
    Leaderboard,
    /// Give feedback to a colleague
    FeedbackForm {
        /// Person receiving the feedback
        recipient_id: String,
    },
    /// Feedback given and received
    FeedbackHistory,

    // AI and recommendations
    /// Personalized recommendations
    AiRecommendations,
    /// AI career coach
    AiCoach,
    /// Single AI insight
    CareerInsight {
        /// Insight identifier
        insight_id: String,
    },

    // Subscription
    /// Subscription overview
    Subscription,
    /// Paywall for a premium feature
    Paywall {
        /// Feature being unlocked
        feature: String,
    },
    /// Manage an active subscription
    ManageSubscription,
    /// Purchase confirmation
    PurchaseComplete {
        /// Purchased product
        product_id: String,
    },

    // Onboarding and auth
    /// Onboarding flow
    Onboarding {
        /// Zero-based onboarding step
        step: u8,
    },
    /// Login screen
    Login,
    /// Create account
    Signup,
    /// Password reset
    PasswordReset,

    // HR and enterprise
    /// Organization dashboard for HR
    HrDashboard {
        /// Organization identifier
        org_id: String,
    },
    /// Employee directory
    EmployeeDirectory,
    /// Single employee
    EmployeeDetail {
        /// Employee identifier
        employee_id: String,
    },
    /// Performance review
    PerformanceReview {
        /// Review identifier
        review_id: String,
    },
    /// Team management
    TeamManagement {
        /// Team identifier
        team_id: String,
    },

    // Social and sharing
    /// Shared content opened from a link
    Share {
        /// Kind of shared content
        share_type: ShareType,
        /// Identifier of the shared content
        id: String,
    },
    /// A user's connections
    Connections {
        /// User identifier
        user_id: String,
    },

    // Support
    /// Help center
    Help,
    /// About the app
    About,
    /// Privacy policy
    PrivacyPolicy,
    /// Terms of service
    TermsOfService,
    /// Contact support
    ContactSupport,
}

/// Feature area a destination belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureArea {
    /// Dashboard, profile, settings
    Core,
    /// Reports and analytics
    Reports,
    /// Career development and gamification
    Career,
    /// AI recommendations
    Ai,
    /// Subscription and paywall
    Subscription,
    /// Onboarding and authentication
    Onboarding,
    /// HR and enterprise
    Enterprise,
    /// Social and sharing
    Social,
    /// Help and legal
    Support,
}

impl Default for Destination {
    fn default() -> Self {
        Destination::Dashboard
    }
}

impl Destination {
    /// Check if this destination requires authentication
    pub fn requires_auth(&self) -> bool {
        !matches!(
            self,
            Destination::Login
                | Destination::Signup
                | Destination::Onboarding { .. }
                | Destination::PasswordReset
                | Destination::Help
                | Destination::About
                | Destination::PrivacyPolicy
                | Destination::TermsOfService
        )
    }

    /// Get a display title for this destination
    pub fn title(&self) -> &'static str {
        match self {
            Destination::Dashboard => "Dashboard",
            Destination::Profile { .. } => "Profile",
            Destination::Settings => "Settings",
            Destination::Notifications => "Notifications",
            Destination::Search { .. } => "Search",
            Destination::Reports => "Reports",
            Destination::ReportDetail { .. } => "Report",
            Destination::Analytics { .. } => "Analytics",
            Destination::ExportReport { .. } => "Export Report",
            Destination::TeamInsights { .. } => "Team Insights",
            Destination::CareerGoals => "Career Goals",
            Destination::GoalDetail { .. } => "Goal",
            Destination::SkillAssessment { .. } => "Skill Assessment",
            Destination::LearningPath { .. } => "Learning Path",
            Destination::Achievements => "Achievements",
            Destination::Leaderboard => "Leaderboard",
            Destination::FeedbackForm { .. } => "Give Feedback",
            Destination::FeedbackHistory => "Feedback",
            Destination::AiRecommendations => "Recommendations",
            Destination::AiCoach => "Career Coach",
            Destination::Subscription => "Subscription",
            Destination::Paywall { .. } => "Go Premium",
            Destination::Login => "Log In",
            Destination::Signup => "Create Account",
            Destination::PasswordReset => "Reset Password",
            Destination::HrDashboard { .. } => "HR Dashboard",
            Destination::EmployeeDirectory => "Directory",
            Destination::PerformanceReview { .. } => "Performance Review",
            Destination::Help => "Help",
            Destination::About => "About",
            Destination::PrivacyPolicy => "Privacy Policy",
            Destination::TermsOfService => "Terms of Service",
            _ => APP_NAME,
        }
    }

    /// Get the feature area this destination belongs to
    pub fn feature_area(&self) -> FeatureArea {
        match self {
            Destination::Dashboard
            | Destination::Profile { .. }
            | Destination::Settings
            | Destination::Notifications
            | Destination::Search { .. } => FeatureArea::Core,
            Destination::Reports
            | Destination::ReportDetail { .. }
            | Destination::Analytics { .. }
            | Destination::ExportReport { .. }
            | Destination::TeamInsights { .. } => FeatureArea::Reports,
            Destination::CareerGoals
            | Destination::GoalDetail { .. }
            | Destination::SkillAssessment { .. }
            | Destination::LearningPath { .. }
            | Destination::Achievements
            | Destination::Leaderboard
            | Destination::FeedbackForm { .. }
            | Destination::FeedbackHistory => FeatureArea::Career,
            Destination::AiRecommendations
            | Destination::AiCoach
            | Destination::CareerInsight { .. } => FeatureArea::Ai,
            Destination::Subscription
            | Destination::Paywall { .. }
            | Destination::ManageSubscription
            | Destination::PurchaseComplete { .. } => FeatureArea::Subscription,
            Destination::Onboarding { .. }
            | Destination::Login
            | Destination::Signup
            | Destination::PasswordReset => FeatureArea::Onboarding,
            Destination::HrDashboard { .. }
            | Destination::EmployeeDirectory
            | Destination::EmployeeDetail { .. }
            | Destination::PerformanceReview { .. }
            | Destination::TeamManagement { .. } => FeatureArea::Enterprise,
            Destination::Share { .. } | Destination::Connections { .. } => FeatureArea::Social,
            Destination::Help
            | Destination::About
            | Destination::PrivacyPolicy
            | Destination::TermsOfService
            | Destination::ContactSupport => FeatureArea::Support,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_public_destinations() {
        assert!(!Destination::Login.requires_auth());
        assert!(!Destination::Signup.requires_auth());
        assert!(!Destination::Onboarding { step: 2 }.requires_auth());
        assert!(!Destination::PasswordReset.requires_auth());
        assert!(!Destination::Help.requires_auth());
        assert!(!Destination::About.requires_auth());
        assert!(!Destination::PrivacyPolicy.requires_auth());
        assert!(!Destination::TermsOfService.requires_auth());
    }

    #[test]
    fn test_everything_else_requires_auth() {
        assert!(Destination::Dashboard.requires_auth());
        assert!(Destination::ContactSupport.requires_auth());
        assert!(Destination::Subscription.requires_auth());
        assert!(Destination::Share {
            share_type: ShareType::Goal,
            id: "g1".to_string()
        }
        .requires_auth());
    }

    #[test]
    fn test_title() {
        assert_eq!(Destination::Dashboard.title(), "Dashboard");
        assert_eq!(
            Destination::Profile {
                user_id: "u1".to_string()
            }
            .title(),
            "Profile"
        );
        assert_eq!(Destination::Login.title(), "Log In");
    }

    #[test]
    fn test_title_falls_back_to_app_name() {
        assert_eq!(Destination::ContactSupport.title(), APP_NAME);
        assert_eq!(
            Destination::Share {
                share_type: ShareType::Profile,
                id: "u1".to_string()
            }
            .title(),
            APP_NAME
        );
    }

    #[test]
    fn test_equality_and_hash() {
        let mut seen = HashSet::new();
        seen.insert(Destination::Profile {
            user_id: "u1".to_string(),
        });
        seen.insert(Destination::Profile {
            user_id: "u1".to_string(),
        });
        seen.insert(Destination::Profile {
            user_id: "u2".to_string(),
        });
        assert_eq!(seen.len(), 2);
        assert!(seen.contains(&Destination::Profile {
            user_id: "u2".to_string()
        }));
    }

    #[test]
    fn test_payload_enum_names() {
        for format in ExportFormat::all() {
            assert_eq!(format.as_str().parse::<ExportFormat>(), Ok(format));
        }
        for share_type in ShareType::all() {
            assert_eq!(share_type.as_str().parse::<ShareType>(), Ok(share_type));
        }
        assert_eq!(
            "bogus".parse::<ShareType>(),
            Err(UnknownVariant("bogus".to_string()))
        );
    }

    #[test]
    fn test_feature_area() {
        assert_eq!(Destination::Dashboard.feature_area(), FeatureArea::Core);
        assert_eq!(Destination::Leaderboard.feature_area(), FeatureArea::Career);
        assert_eq!(
            Destination::HrDashboard {
                org_id: "o1".to_string()
            }
            .feature_area(),
            FeatureArea::Enterprise
        );
    }

    #[test]
    fn test_destination_serialization() {
        let destination = Destination::ExportReport {
            report_id: "r9".to_string(),
            format: ExportFormat::Csv,
        };
        let json = serde_json::to_string(&destination).unwrap();
        assert!(json.contains("\"csv\""));
        let parsed: Destination = serde_json::from_str(&json).unwrap();
        assert_eq!(destination, parsed);
    }
}
