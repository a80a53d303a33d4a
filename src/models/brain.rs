use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use teloxide::types::ChatId;

use super::UserState;

/// Корень файла `brain.json`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Brain {
    #[serde(default)]
    pub users: BTreeMap<i64, UserState>,
}

impl Brain {
    pub fn user(&self, chat_id: ChatId) -> Option<&UserState> {
        self.users.get(&chat_id.0)
    }

    pub fn user_mut(&mut self, chat_id: ChatId) -> Option<&mut UserState> {
        self.users.get_mut(&chat_id.0)
    }

    pub fn set_user(&mut self, chat_id: ChatId, state: UserState) {
        self.users.insert(chat_id.0, state);
    }
}
