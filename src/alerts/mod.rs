//! Alert evaluation and notification system
//!
//! Turns recorded check outcomes into threshold verdicts and fans the
//! resulting notifications out to configured alertees.

mod evaluator;
mod notifier;
mod resolver;

pub use evaluator::{Evaluation, ThresholdEvaluator};
pub use notifier::{Notification, Notifier};
pub use resolver::{Alertee, ChannelTarget, Directory};
