//! Outbound message templates.
//!
//! Wording is part of the participant contract — labeling crews learn these
//! prompts by shape — so changes here are breaking.

use crate::assignment::AssignmentPrompt;

pub const NO_DATA: &str = "No unlabeled data available at the moment.";

pub const START_HINT: &str = "Please type *start* to start the session";

pub const STOPPED: &str = "You have successfully stopped the session";

pub const STORED: &str = "Data Stored Successfully 🚀✅";

pub const ALREADY_CLASSIFIED: &str =
  "Data has already been classified and is awaiting *Review*";

pub const START_FAILED: &str =
  "Failed to start the session, please try again later.";

pub const STOP_FAILED: &str =
  "Failed to stop the session, please try again later.";

/// The task explainer appended to every corrective reply.
pub const TASK_TEMPLATE: &str = "Please classify the text to one of the following labels and provide the language of the text:\n\n*positive*\n*negative*\n*neutral*\n\nFormat:\n[ID] [label] [language]\n\nExample:\n\n_43 positive english_\n\nOr type *disconnect* to stop the session";

/// First prompt of a session: the item plus the full task explainer.
pub fn first_prompt(prompt: &AssignmentPrompt) -> String {
  format!(
    "*ID:* {}\n*Text:* {}\n\n*Task*\nPlease classify the above text to one of the following labels and provide the language of the text:\n\n*positive*\n*negative*\n*neutral*\n\nFormat:\n[ID] [label] [language]\n\nExample:\n\n_43 positive english_\n\nOr type *disconnect* to stop the session",
    prompt.id, prompt.text
  )
}

/// Follow-up prompt once the participant knows the drill.
pub fn followup_prompt(prompt: &AssignmentPrompt) -> String {
  format!(
    "*ID:* {}\n*Text:* {}\n\n[ID] [Label] [Language]\n\nSend *_disconnect_* to stop the session",
    prompt.id, prompt.text
  )
}

pub fn incorrect_format() -> String {
  format!("🛑 *Incorrect Format !*\n\n{TASK_TEMPLATE}")
}

pub fn already_classified() -> String {
  format!("{ALREADY_CLASSIFIED}\n\n{TASK_TEMPLATE}")
}

pub fn classification_failed(reason: &str) -> String {
  format!(
    "An Error Occured while classifying the data\n\nError:{reason}\n\n{TASK_TEMPLATE}"
  )
}
