//! Context window construction for one advice round-trip
//!
//! The builder never mutates the transcript it is given. When a history
//! window is configured only the most recent turns are rendered, still in
//! chronological order.

use super::template::StylistPromptTemplate;
use crate::catalog::entities::{Catalog, Product};
use crate::conversation::log::ChatMessage;
use serde::Serialize;

/// The outbound payload for the advice service (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdviceContext {
    /// Fixed persona and rules
    pub preamble: String,
    /// One line per product, catalog order
    pub catalog_summary: String,
    /// `"<Label>: <text>"` lines, chronological order
    pub history_excerpt: String,
    /// The shopper's query, verbatim
    pub query: String,
}

impl AdviceContext {
    /// System-level directive: the preamble followed by the catalog block.
    pub fn system_instruction(&self) -> String {
        format!(
            "{}\n\n{}\n{}",
            self.preamble,
            StylistPromptTemplate::catalog_heading(),
            self.catalog_summary
        )
    }

    /// User-turn content: recent history followed by the current query.
    pub fn user_turn(&self) -> String {
        StylistPromptTemplate::user_turn(&self.history_excerpt, &self.query)
    }
}

/// Builds [`AdviceContext`] values from catalog, transcript and query.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextBuilder {
    history_window: Option<usize>,
}

impl ContextBuilder {
    /// Builder that renders the entire transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the rendered history to the last `window` messages.
    pub fn with_history_window(mut self, window: Option<usize>) -> Self {
        self.history_window = window;
        self
    }

    pub fn history_window(&self) -> Option<usize> {
        self.history_window
    }

    pub fn build(&self, query: &str, catalog: &Catalog, history: &[ChatMessage]) -> AdviceContext {
        AdviceContext {
            preamble: StylistPromptTemplate::preamble().to_string(),
            catalog_summary: Self::catalog_summary(catalog),
            history_excerpt: self.history_excerpt(history),
            query: query.to_string(),
        }
    }

    /// `- <name> (ID: <id>): <category>, $<price>. <description>` per product.
    pub fn catalog_summary(catalog: &Catalog) -> String {
        catalog
            .iter()
            .map(Self::catalog_line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn catalog_line(product: &Product) -> String {
        format!(
            "- {} (ID: {}): {}, ${}. {}",
            product.name, product.id, product.category, product.price, product.description
        )
    }

    /// Render the (possibly windowed) transcript.
    pub fn history_excerpt(&self, history: &[ChatMessage]) -> String {
        let start = match self.history_window {
            Some(window) => history.len().saturating_sub(window),
            None => 0,
        };
        history[start..]
            .iter()
            .map(|m| {
                format!(
                    "{}: {}",
                    StylistPromptTemplate::role_label(m.role()),
                    m.text()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::log::{ChatRole, ConversationLog};

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Product::new("1", "The Milano Oxford", 450, "Oxford")
                .with_description("Cuero de becerro de grano completo."),
            Product::new("3", "Roma Chelsea Boot", 520, "Boots")
                .with_description("Silueta esbelta con elásticos reforzados."),
        ])
        .unwrap()
    }

    fn transcript() -> ConversationLog {
        let mut log = ConversationLog::with_greeting("Bienvenido a Aurelio.");
        log.append(ChatRole::Shopper, "Tengo una boda");
        log.append(ChatRole::Assistant, "Le sugiero **The Milano Oxford**.");
        log
    }

    #[test]
    fn test_catalog_summary_one_line_per_product_in_order() {
        let summary = ContextBuilder::catalog_summary(&catalog());
        let lines: Vec<_> = summary.lines().collect();
        assert_eq!(
            lines,
            vec![
                "- The Milano Oxford (ID: 1): Oxford, $450. Cuero de becerro de grano completo.",
                "- Roma Chelsea Boot (ID: 3): Boots, $520. Silueta esbelta con elásticos reforzados.",
            ]
        );
    }

    #[test]
    fn test_history_rendered_with_labels_in_order() {
        let log = transcript();
        let excerpt = ContextBuilder::new().history_excerpt(log.all());
        assert_eq!(
            excerpt,
            "Aurelio: Bienvenido a Aurelio.\nCliente: Tengo una boda\nAurelio: Le sugiero **The Milano Oxford**."
        );
    }

    #[test]
    fn test_history_window_keeps_latest_turns_chronologically() {
        let log = transcript();
        let excerpt = ContextBuilder::new()
            .with_history_window(Some(2))
            .history_excerpt(log.all());
        assert_eq!(
            excerpt,
            "Cliente: Tengo una boda\nAurelio: Le sugiero **The Milano Oxford**."
        );
    }

    #[test]
    fn test_window_larger_than_transcript_renders_everything() {
        let log = transcript();
        let builder = ContextBuilder::new().with_history_window(Some(50));
        assert_eq!(builder.history_excerpt(log.all()).lines().count(), 3);
    }

    #[test]
    fn test_build_keeps_query_verbatim_and_separates_preamble() {
        let log = transcript();
        let ctx = ContextBuilder::new().build("  necesito botas negras ", &catalog(), log.all());
        assert_eq!(ctx.query, "  necesito botas negras ");
        assert!(!ctx.catalog_summary.contains("Instrucciones"));
        assert!(!ctx.history_excerpt.contains("Instrucciones"));

        let system = ctx.system_instruction();
        assert!(system.starts_with(StylistPromptTemplate::preamble()));
        assert!(system.ends_with(&ctx.catalog_summary));

        let user = ctx.user_turn();
        assert!(user.starts_with("Historial de chat reciente:\nAurelio: Bienvenido"));
        assert!(user.ends_with("Consulta actual del usuario:   necesito botas negras "));
    }

    #[test]
    fn test_empty_history_still_builds() {
        let ctx = ContextBuilder::new().build("hola", &catalog(), &[]);
        assert_eq!(ctx.history_excerpt, "");
        assert_eq!(
            ctx.user_turn(),
            "Historial de chat reciente:\n\n\nConsulta actual del usuario: hola"
        );
    }
}
