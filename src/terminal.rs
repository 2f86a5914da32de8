use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Password};

pub fn password(prompt: &str) -> Result<String> {
    Ok(Password::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact()?)
}

const INDENT_SIZE: usize = 2;

pub struct BulletPointPrinter {
    nesting: usize,
}

impl BulletPointPrinter {
    pub fn new() -> Self {
        Self { nesting: 0 }
    }

    pub fn print_item(&self, message: impl std::fmt::Display) {
        let indent = " ".repeat(self.nesting * INDENT_SIZE);
        println!("{}• {}", indent, message);
    }

    pub fn indent(&self) -> Self {
        Self {
            nesting: self.nesting + 1,
        }
    }
}
