use crate::common::{MountId, TextField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

#[derive(Debug)]
pub struct LoginState {
    pub mount: MountId,
    pub email: TextField,
    pub password: TextField,
    pub focus: LoginField,
    pub error: Option<String>,
    pub busy: bool,
}

impl LoginState {
    pub fn new(mount: MountId) -> Self {
        Self {
            mount,
            email: TextField::single_line(),
            password: TextField::single_line(),
            focus: LoginField::Email,
            error: None,
            busy: false,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }

    pub fn focused_mut(&mut self) -> &mut TextField {
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }
}
