//! Slash-command parsing for the storefront REPL

/// A parsed REPL command. Lines not starting with `/` are shopper queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplCommand<'a> {
    Catalog,
    Show(&'a str),
    Add(&'a str),
    Remove(&'a str),
    Inc(&'a str),
    Dec(&'a str),
    Cart,
    History,
    Reset,
    Help,
    Quit,
    /// A known command that needs a product id but got none
    MissingProductId(&'static str),
    Unknown(&'a str),
}

impl<'a> ReplCommand<'a> {
    /// Parse a trimmed input line; `None` when the line is not a command.
    pub fn parse(line: &'a str) -> Option<Self> {
        let rest = line.strip_prefix('/')?;
        let mut parts = rest.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();

        let with_id = |usage: &'static str, make: fn(&'a str) -> Self| match arg {
            Some(id) => make(id),
            None => Self::MissingProductId(usage),
        };

        let command = match name {
            "catalog" | "c" => Self::Catalog,
            "show" => with_id("/show <id>", Self::Show),
            "add" | "a" => with_id("/add <id>", Self::Add),
            "remove" | "rm" => with_id("/remove <id>", Self::Remove),
            "inc" | "+" => with_id("/inc <id>", Self::Inc),
            "dec" | "-" => with_id("/dec <id>", Self::Dec),
            "cart" => Self::Cart,
            "history" => Self::History,
            "reset" => Self::Reset,
            "help" | "h" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => Self::Unknown(line),
        };
        Some(command)
    }

    /// Help text listing every command
    pub fn help() -> &'static str {
        r#"Commands:
  /catalog, /c         - List the collection
  /show <id>           - Show product details
  /add <id>, /a <id>   - Add one unit to the cart
  /remove <id>, /rm    - Remove a product from the cart
  /inc <id>, /+ <id>   - Increase quantity by one
  /dec <id>, /- <id>   - Decrease quantity by one (never below one)
  /cart                - Show the cart
  /history             - Show the conversation
  /reset               - Empty the cart and start a new conversation
  /help, /h, /?        - Show this help
  /quit, /exit, /q     - Exit

Any other line is sent to the Aurelio concierge."#
    }
}
