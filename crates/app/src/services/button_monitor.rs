//! Button monitor — reads the button cloud and evaluates the activation window.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use heathub_domain::button::{ButtonActivation, ButtonEdgePair, ButtonEvaluator};
use heathub_domain::error::HeatHubError;

use crate::ports::ButtonCloud;

/// What the button contributes to a heating cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonSignal {
    /// The evaluator produced an answer.
    Activation(ButtonActivation),
    /// The cloud could not be read; distinct from `Off` so no "last on"
    /// flag is recorded.
    Unknown,
    /// No button is configured.
    Disabled,
}

impl ButtonSignal {
    /// Whether the button is currently asking for heat.
    #[must_use]
    pub fn is_active(self) -> bool {
        self == Self::Activation(ButtonActivation::On)
    }
}

impl fmt::Display for ButtonSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Activation(activation) => f.write_str(activation.as_str()),
            Self::Unknown => f.write_str("unknown"),
            Self::Disabled => f.write_str("disabled"),
        }
    }
}

/// Result of a successful button check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonCheck {
    /// Edges as read from the cloud.
    pub edges: ButtonEdgePair,
    /// Evaluator outcome.
    pub activation: ButtonActivation,
}

/// Reads button edges through a [`ButtonCloud`] and evaluates them.
pub struct ButtonMonitor<B> {
    cloud: B,
    evaluator: ButtonEvaluator,
}

impl<B: ButtonCloud> ButtonMonitor<B> {
    /// Create a monitor reading from `cloud`.
    pub fn new(cloud: B, evaluator: ButtonEvaluator) -> Self {
        Self { cloud, evaluator }
    }

    /// The evaluator in use.
    pub fn evaluator(&self) -> &ButtonEvaluator {
        &self.evaluator
    }

    /// Fetch the edges and evaluate them at `now` (local wall-clock time).
    ///
    /// # Errors
    ///
    /// Propagates the collaborator error unchanged; the caller decides how to
    /// degrade it.
    pub async fn check(&self, now: &DateTime<FixedOffset>) -> Result<ButtonCheck, HeatHubError> {
        let edges = self.cloud.get_edges().await?;
        let activation = self.evaluator.evaluate(&edges, now);
        tracing::debug!(
            up = ?edges.up_pressed_at,
            down = ?edges.down_pressed_at,
            activation = activation.as_str(),
            "button evaluated"
        );
        Ok(ButtonCheck { edges, activation })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, Utc};
    use heathub_domain::button::QuietHours;
    use heathub_domain::error::Collaborator;

    struct StubCloud(Result<ButtonEdgePair, fn() -> HeatHubError>);

    impl ButtonCloud for StubCloud {
        async fn get_edges(&self) -> Result<ButtonEdgePair, HeatHubError> {
            match &self.0 {
                Ok(edges) => Ok(*edges),
                Err(make) => Err(make()),
            }
        }
    }

    fn evening() -> DateTime<FixedOffset> {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(19, 0, 0)
            .unwrap()
            .and_local_timezone(FixedOffset::east_opt(3600).unwrap())
            .unwrap()
    }

    fn monitor(cloud: StubCloud) -> ButtonMonitor<StubCloud> {
        ButtonMonitor::new(
            cloud,
            ButtonEvaluator::new(20.0, QuietHours::default()).unwrap(),
        )
    }

    #[tokio::test]
    async fn should_report_on_when_recent_up_press() {
        let now = evening();
        let edges = ButtonEdgePair {
            up_pressed_at: Some((now - Duration::minutes(5)).with_timezone(&Utc)),
            down_pressed_at: None,
        };
        let check = monitor(StubCloud(Ok(edges))).check(&now).await.unwrap();
        assert_eq!(check.activation, ButtonActivation::On);
        assert_eq!(check.edges, edges);
    }

    #[tokio::test]
    async fn should_propagate_cloud_error() {
        let cloud = StubCloud(Err(|| {
            HeatHubError::authentication(Collaborator::Button, "token expired")
        }));
        let result = monitor(cloud).check(&evening()).await;
        assert!(matches!(result, Err(HeatHubError::Authentication { .. })));
    }

    #[test]
    fn should_only_be_active_when_on() {
        assert!(ButtonSignal::Activation(ButtonActivation::On).is_active());
        assert!(!ButtonSignal::Activation(ButtonActivation::Off).is_active());
        assert!(!ButtonSignal::Activation(ButtonActivation::Suppressed).is_active());
        assert!(!ButtonSignal::Unknown.is_active());
        assert!(!ButtonSignal::Disabled.is_active());
    }

    #[test]
    fn should_display_signal_names() {
        assert_eq!(ButtonSignal::Unknown.to_string(), "unknown");
        assert_eq!(
            ButtonSignal::Activation(ButtonActivation::Suppressed).to_string(),
            "suppressed"
        );
    }
}
