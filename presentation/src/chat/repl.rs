//! REPL (Read-Eval-Print Loop) for the interactive storefront

use super::command::ReplCommand;
use crate::{AdviceIndicator, ConsoleFormatter};
use aurelio_application::{SendOutcome, StorefrontSession};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

const FEATURED_COUNT: usize = 3;

/// Interactive storefront REPL
pub struct StorefrontRepl {
    session: Arc<StorefrontSession>,
    show_progress: bool,
    history_file: Option<PathBuf>,
}

impl StorefrontRepl {
    /// Create a new StorefrontRepl
    pub fn new(session: Arc<StorefrontSession>) -> Self {
        Self {
            session,
            show_progress: true,
            history_file: None,
        }
    }

    /// Set whether to show the loading indicator
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Set the readline history file
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        self.history_file = path;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(ref path) = self.history_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let readline = rl.readline(&self.prompt());

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    if let Some(command) = ReplCommand::parse(line) {
                        if self.handle_command(command) {
                            break;
                        }
                        continue;
                    }

                    self.ask(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Arrivederci!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = self.history_file {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    /// Send one shopper query and print the concierge's reply.
    pub async fn ask(&self, query: &str) -> SendOutcome {
        println!();

        let phases = self.session.subscribe_phase();
        let work = self.session.send_query(query);
        let outcome = if self.show_progress {
            AdviceIndicator::new().track(phases, work).await
        } else {
            work.await
        };

        match &outcome {
            SendOutcome::Answered { reply, outcome } => {
                debug!(outcome = %outcome, id = %reply.id(), "Concierge replied");
                println!("{}", ConsoleFormatter::format_message(reply));
                self.session.acknowledge_reply();
            }
            SendOutcome::Busy => {
                println!("{}", "Aurelio todavía está respondiendo. Un momento...".yellow());
            }
            SendOutcome::Ignored => {}
        }
        println!();

        outcome
    }

    fn prompt(&self) -> String {
        let count = self.session.item_count();
        if count == 0 {
            "aurelio> ".to_string()
        } else {
            format!("aurelio [{}]> ", count)
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│     Concierge Aurelio · Asesoría de Estilo  │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        if let Some(greeting) = self.session.transcript().first() {
            println!("{}", ConsoleFormatter::format_message(greeting));
            println!();
        }
        println!(
            "{}",
            ConsoleFormatter::format_featured(self.session.catalog().featured(FEATURED_COUNT))
        );
        println!(
            "{} products in the collection. Type /catalog to browse, /help for commands.",
            self.session.catalog().len()
        );
        println!();
    }

    /// Handle a slash command. Returns true if the REPL should exit.
    fn handle_command(&self, command: ReplCommand<'_>) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Arrivederci!");
                return true;
            }
            ReplCommand::Help => {
                println!();
                println!("{}", ReplCommand::help());
                println!();
            }
            ReplCommand::Catalog => {
                println!("{}", ConsoleFormatter::format_catalog(self.session.catalog()));
            }
            ReplCommand::Show(id) => match self.session.catalog().find(id) {
                Some(product) => println!("{}", ConsoleFormatter::format_product(product)),
                None => Self::unknown_product(id),
            },
            ReplCommand::Add(id) => {
                let Some(product) = self.session.catalog().find(id) else {
                    Self::unknown_product(id);
                    return false;
                };
                let cart = self.session.add_to_cart(id);
                println!("{} {}", "Añadido:".green(), product.name.bold());
                println!("{}", ConsoleFormatter::format_cart_badge(&cart));
            }
            ReplCommand::Remove(id) => {
                if self.session.cart().line(id).is_none() {
                    println!("{} {}", "Not in the cart:".yellow(), id);
                    return false;
                }
                let cart = self.session.remove_from_cart(id);
                println!("{}", ConsoleFormatter::format_cart_badge(&cart));
            }
            ReplCommand::Inc(id) => self.change_quantity(id, 1),
            ReplCommand::Dec(id) => self.change_quantity(id, -1),
            ReplCommand::Cart => {
                println!("{}", ConsoleFormatter::format_cart(&self.session.cart()));
            }
            ReplCommand::History => {
                println!();
                println!(
                    "{}",
                    ConsoleFormatter::format_transcript(&self.session.transcript())
                );
                println!();
            }
            ReplCommand::Reset => {
                if self.session.reset() {
                    println!("{}", "Cart emptied and conversation restarted.".green());
                } else {
                    println!("{}", "Wait for the current reply before resetting.".yellow());
                }
            }
            ReplCommand::MissingProductId(usage) => {
                println!("Usage: {}", usage);
            }
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        false
    }

    fn change_quantity(&self, id: &str, delta: i64) {
        let Some(before) = self.session.cart().line(id).map(|l| l.quantity) else {
            println!("{} {}", "Not in the cart:".yellow(), id);
            return;
        };

        let cart = self.session.update_quantity(id, delta);
        let after = cart.line(id).map(|l| l.quantity).unwrap_or_default();
        if after == before {
            println!(
                "{}",
                "Quantity cannot go below one; use /remove to drop the product.".yellow()
            );
        }
        println!("{}", ConsoleFormatter::format_cart_badge(&cart));
    }

    fn unknown_product(id: &str) {
        println!("{} {}", "Unknown product:".yellow(), id);
        println!("Type /catalog to list product ids");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use aurelio_application::{
        AdviceOutcome, AdviceParams, AdvicePhase, GatewayError, GenerationRequest, LlmGateway,
        RequestAdviceUseCase,
    };
    use aurelio_domain::{Catalog, Product};

    struct CannedGateway;

    #[async_trait]
    impl LlmGateway for CannedGateway {
        async fn generate(&self, _request: &GenerationRequest) -> Result<String, GatewayError> {
            Ok("Le sugiero **Roma Chelsea Boot**.".to_string())
        }
    }

    fn repl() -> StorefrontRepl {
        let catalog = Catalog::new(vec![
            Product::new("1", "The Milano Oxford", 450, "Oxford"),
            Product::new("3", "Roma Chelsea Boot", 520, "Botas"),
        ])
        .unwrap();
        let advice = RequestAdviceUseCase::new(Arc::new(CannedGateway), AdviceParams::default());
        let session = Arc::new(StorefrontSession::new(Arc::new(catalog), advice));
        StorefrontRepl::new(session).with_progress(false)
    }

    #[tokio::test]
    async fn test_ask_appends_both_turns() {
        let repl = repl();
        let outcome = repl.ask("botas para lluvia").await;

        match outcome {
            SendOutcome::Answered { reply, outcome } => {
                assert_eq!(outcome, AdviceOutcome::Answered);
                assert_eq!(reply.text(), "Le sugiero **Roma Chelsea Boot**.");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(repl.session.transcript().len(), 3);
        assert_eq!(repl.session.advice_phase(), AdvicePhase::Idle);
    }

    #[tokio::test]
    async fn test_ask_blank_is_ignored() {
        let repl = repl();
        assert_eq!(repl.ask("   ").await, SendOutcome::Ignored);
        assert_eq!(repl.session.transcript().len(), 1);
    }

    #[test]
    fn test_cart_commands() {
        let repl = repl();

        assert!(!repl.handle_command(ReplCommand::Add("3")));
        assert!(!repl.handle_command(ReplCommand::Inc("3")));
        assert_eq!(repl.session.cart().subtotal, 1040);
        assert_eq!(repl.prompt(), "aurelio [2]> ");

        repl.handle_command(ReplCommand::Dec("3"));
        repl.handle_command(ReplCommand::Dec("3"));
        assert_eq!(repl.session.cart().line("3").map(|l| l.quantity), Some(1));

        repl.handle_command(ReplCommand::Add("99"));
        assert_eq!(repl.session.item_count(), 1);

        repl.handle_command(ReplCommand::Remove("3"));
        assert!(repl.session.cart().is_empty());
        assert_eq!(repl.prompt(), "aurelio> ");
    }

    #[test]
    fn test_reset_and_quit() {
        let repl = repl();
        repl.handle_command(ReplCommand::Add("1"));
        assert!(!repl.handle_command(ReplCommand::Reset));
        assert!(repl.session.cart().is_empty());
        assert!(repl.handle_command(ReplCommand::Quit));
    }
}
