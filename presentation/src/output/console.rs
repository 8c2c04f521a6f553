//! Console output formatter for the storefront

use aurelio_domain::{
    BOLD_MARKER, CartSnapshot, Catalog, ChatMessage, ChatRole, Product, StylistPromptTemplate,
};
use colored::Colorize;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static BOLD_SPAN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    let marker = regex::escape(BOLD_MARKER);
    Regex::new(&format!("{marker}(.+?){marker}")).ok()
});

/// Formats catalog, cart and chat turns for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Price in whole currency units, e.g. `$450`
    pub fn price(amount: u64) -> String {
        format!("${}", amount)
    }

    /// Replace `**name**` spans with terminal bold.
    ///
    /// Unterminated markers are left as typed.
    pub fn render_markers(text: &str) -> String {
        match BOLD_SPAN.as_ref() {
            Some(re) => re
                .replace_all(text, |caps: &Captures| caps[1].bold().to_string())
                .into_owned(),
            None => text.to_string(),
        }
    }

    /// The full catalog listing
    pub fn format_catalog(catalog: &Catalog) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("La Colección"));
        output.push('\n');

        for product in catalog {
            output.push_str(&format!(
                "\n{} {} {}\n",
                format!("[{}]", product.id).dimmed(),
                product.name.bold(),
                Self::price(product.price).yellow()
            ));
            output.push_str(&format!("    {}\n", product.category.cyan()));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Home-page selection shown on the welcome screen
    pub fn format_featured(products: &[Product]) -> String {
        let mut output = format!("{}\n", "Colección destacada".cyan().bold());
        for product in products {
            output.push_str(&format!(
                "  {} {} {}\n",
                format!("[{}]", product.id).dimmed(),
                product.name.bold(),
                Self::price(product.price).yellow()
            ));
        }
        output
    }

    /// Detail view of one product
    pub fn format_product(product: &Product) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n",
            product.name.bold(),
            Self::price(product.price).yellow().bold()
        ));
        output.push_str(&format!(
            "{} {}   {} {}\n\n",
            "ID:".dimmed(),
            product.id,
            "Categoría:".dimmed(),
            product.category.cyan()
        ));
        output.push_str(&Self::indent(&product.description, "  "));
        output.push('\n');

        if !product.features.is_empty() {
            output.push('\n');
            for feature in &product.features {
                output.push_str(&format!("  * {}\n", feature));
            }
        }

        if !product.image_url.is_empty() {
            output.push_str(&format!("\n{} {}\n", "Imagen:".dimmed(), product.image_url));
        }

        output
    }

    /// The cart with lines, quantities and subtotal
    pub fn format_cart(cart: &CartSnapshot) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n",
            "Tu Compra".cyan().bold(),
            format!("({} artículos)", cart.item_count).dimmed()
        ));
        output.push_str(&"-".repeat(40));
        output.push('\n');

        if cart.is_empty() {
            output.push_str(&format!("{}\n", "Tu carrito está vacío.".dimmed()));
            return output;
        }

        for line in &cart.lines {
            output.push_str(&format!(
                "{:>3} x {} {}\n",
                line.quantity,
                line.product.name.bold(),
                format!("[{}]", line.product.id).dimmed()
            ));
            output.push_str(&format!(
                "      {} c/u   {}\n",
                Self::price(line.product.price),
                Self::price(line.line_total()).yellow()
            ));
        }

        output.push_str(&"-".repeat(40));
        output.push('\n');
        output.push_str(&format!(
            "{} {}\n",
            "Subtotal".bold(),
            Self::price(cart.subtotal).yellow().bold()
        ));
        output.push_str(&format!(
            "{}\n",
            "Impuestos y envío calculados al finalizar la compra.".dimmed()
        ));

        output
    }

    /// One-line cart badge shown after cart commands
    pub fn format_cart_badge(cart: &CartSnapshot) -> String {
        format!(
            "{} {} · {}",
            "Carrito:".dimmed(),
            cart.item_count,
            Self::price(cart.subtotal)
        )
    }

    /// A single chat turn with its speaker label
    pub fn format_message(message: &ChatMessage) -> String {
        let label = StylistPromptTemplate::role_label(message.role());
        let label = match message.role() {
            ChatRole::Shopper => label.green().bold(),
            ChatRole::Assistant => label.yellow().bold(),
        };
        let text = match message.role() {
            ChatRole::Shopper => message.text().to_string(),
            ChatRole::Assistant => Self::render_markers(message.text()),
        };
        format!("{} {}", label, text)
    }

    /// The whole transcript, oldest first
    pub fn format_transcript(messages: &[ChatMessage]) -> String {
        messages
            .iter()
            .map(Self::format_message)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
