use crate::models::{BackupState, HostState};
use crate::prompt::Prompter;
use thiserror::Error;

pub const CONFIRM_PROMPT: &str = "Continue anyway? [y/N] ";

const RUN_BACKUP: &str = r#"Please run "spicetify backup apply"."#;
const REINSTALL_THEN_BACKUP: &str = r#"Spotify cannot be backed up at this state. Please re-install Spotify then run "spicetify backup apply"."#;

/// What the gate decided for a given pair of states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Abort { message: String },
    WarnConfirm { warning: String, instructions: Vec<String> },
    Proceed,
}

/// Errors that stop the run at the gate
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GateError {
    #[error("{0}")]
    Abort(String),

    #[error("Backup is outdated and continuing was declined")]
    Declined,
}

/// Decide from the backup and host states alone. Pure; never prompts.
pub fn decide(backup: BackupState, host: HostState) -> GateDecision {
    match backup {
        BackupState::Empty => {
            let message = if host.is_backupable() {
                r#"You haven't backed up. Run "spicetify backup apply"."#.to_string()
            } else {
                r#"You haven't backed up and Spotify cannot be backed up at this state. Please re-install Spotify then run "spicetify backup apply"."#.to_string()
            };
            GateDecision::Abort { message }
        }
        BackupState::Outdated => {
            let instructions = if host.is_mixed() {
                vec![
                    "Spotify client possibly just had an new update.".to_string(),
                    RUN_BACKUP.to_string(),
                ]
            } else if host.is_stock() {
                vec![RUN_BACKUP.to_string()]
            } else {
                vec![REINSTALL_THEN_BACKUP.to_string()]
            };
            GateDecision::WarnConfirm {
                warning: "Spotify version and backup version are mismatched.".to_string(),
                instructions,
            }
        }
        BackupState::Current => GateDecision::Proceed,
    }
}

/// Act on a decision. `WarnConfirm` is the only case that asks the user,
/// and the default answer is no.
pub fn enforce(decision: GateDecision, prompter: &dyn Prompter) -> Result<(), GateError> {
    match decision {
        GateDecision::Abort { message } => {
            tracing::error!("{}", message);
            Err(GateError::Abort(message))
        }
        GateDecision::WarnConfirm {
            warning,
            instructions,
        } => {
            tracing::warn!("{}", warning);
            for line in &instructions {
                tracing::info!("{}", line);
            }
            if prompter.ask(CONFIRM_PROMPT, false) {
                tracing::warn!("Continuing with an outdated backup");
                Ok(())
            } else {
                Err(GateError::Declined)
            }
        }
        GateDecision::Proceed => Ok(()),
    }
}

/// Decide and enforce in one step
pub fn check(backup: BackupState, host: HostState, prompter: &dyn Prompter) -> Result<(), GateError> {
    enforce(decide(backup, host), prompter)
}
