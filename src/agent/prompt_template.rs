use std::collections::HashMap;

use thiserror::Error;

use crate::agent::input_types::{Message, Role};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("missing value for prompt variable `{0}`")]
    MissingVariable(String),
    #[error("unclosed placeholder in template: {0}")]
    UnclosedPlaceholder(String),
}

/// Fixed list of role/template pairs with `{name}` placeholders.
///
/// `{{` and `}}` render as literal braces.
#[derive(Debug, Clone)]
pub struct ChatPromptTemplate {
    messages: Vec<(Role, String)>,
}

impl ChatPromptTemplate {
    pub fn from_messages<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = (Role, S)>,
        S: Into<String>,
    {
        Self {
            messages: messages
                .into_iter()
                .map(|(role, template)| (role, template.into()))
                .collect(),
        }
    }

    /// Render every message with `vars`. Extra variables are ignored.
    pub fn format(&self, vars: &HashMap<&str, &str>) -> Result<Vec<Message>, PromptError> {
        self.messages
            .iter()
            .map(|(role, template)| Ok(Message::new(*role, render(template, vars)?)))
            .collect()
    }
}

fn render(template: &str, vars: &HashMap<&str, &str>) -> Result<String, PromptError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut name = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }
                if !closed {
                    return Err(PromptError::UnclosedPlaceholder(template.to_string()));
                }
                let name = name.trim();
                let value = vars
                    .get(name)
                    .ok_or_else(|| PromptError::MissingVariable(name.to_string()))?;
                out.push_str(value);
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}
