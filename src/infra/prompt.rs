use crate::application::history::SelectionPrompt;
use crate::domain::{PromptOptions, SelectionItem};
use async_trait::async_trait;
use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;

/// Single-select list on the controlling terminal. Esc or `q` dismisses it.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

#[async_trait]
impl SelectionPrompt for TerminalPrompt {
    async fn select_one(
        &self,
        items: Vec<SelectionItem>,
        options: PromptOptions,
    ) -> Option<usize> {
        let labels: Vec<String> = items.iter().map(item_line).collect();
        let choice = tokio::task::spawn_blocking(move || {
            Select::with_theme(&ColorfulTheme::default())
                .with_prompt(options.placeholder)
                .items(&labels)
                .default(0)
                .interact_opt()
        })
        .await;

        match choice {
            Ok(Ok(choice)) => choice,
            Ok(Err(err)) => {
                log::warn!("Selection prompt failed: {}", err);
                None
            }
            Err(err) => {
                log::warn!("Selection prompt task failed: {}", err);
                None
            }
        }
    }
}

/// Used when stdin is not a terminal: there is nobody to ask.
#[derive(Debug, Default)]
pub struct NonInteractivePrompt;

#[async_trait]
impl SelectionPrompt for NonInteractivePrompt {
    async fn select_one(
        &self,
        items: Vec<SelectionItem>,
        _options: PromptOptions,
    ) -> Option<usize> {
        log::warn!(
            "{} repositories found but no terminal to choose from; pass a file or a narrower workspace",
            items.len()
        );
        None
    }
}

fn item_line(item: &SelectionItem) -> String {
    format!("{}  {}", item.label, item.detail)
}
