//! Immutable command metadata consumed by completion, dispatch, and help.
//!
//! The tables are assembled once through [`RegistryBuilder`] and handed to the
//! shell at construction time. Embedders extend the base set by continuing to
//! call builder methods before [`RegistryBuilder::build`]; there is no other
//! extension mechanism.

/// One registered command: its alias list and help metadata.
///
/// The first alias is the canonical form, used for display and lookups.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    aliases: Vec<String>,
    usage: String,
    description: String,
}

impl CommandSpec {
    pub fn canonical(&self) -> &str {
        &self.aliases[0]
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Flag strings offered when completing arguments of the named commands.
#[derive(Debug, Clone)]
struct FlagEntry {
    commands: Vec<String>,
    values: Vec<String>,
}

/// Read-only command/flag/usage/description tables.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    commands: Vec<CommandSpec>,
    flags: Vec<FlagEntry>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Registered commands in registration order.
    pub fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }

    /// Maps any alias to its command's canonical name.
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.lookup(token).map(CommandSpec::canonical)
    }

    /// Finds the command owning the given alias.
    pub fn lookup(&self, token: &str) -> Option<&CommandSpec> {
        self.commands
            .iter()
            .find(|spec| spec.aliases.iter().any(|alias| alias == token))
    }

    pub fn is_alias_of(&self, canonical: &str, token: &str) -> bool {
        self.resolve(token) == Some(canonical)
    }

    /// Every alias of every command, in registration order.
    pub fn all_aliases(&self) -> impl Iterator<Item = &str> {
        self.commands
            .iter()
            .flat_map(|spec| spec.aliases.iter().map(String::as_str))
    }

    /// Every flag string registered under a key naming `canonical`.
    pub fn flags_for<'a>(&'a self, canonical: &'a str) -> impl Iterator<Item = &'a str> {
        self.flags
            .iter()
            .filter(move |entry| entry.commands.iter().any(|c| c == canonical))
            .flat_map(|entry| entry.values.iter().map(String::as_str))
    }
}

/// Composes the immutable [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    registry: Registry,
}

impl RegistryBuilder {
    /// Registers a command. The first alias is the canonical name.
    ///
    /// Panics when `aliases` is empty; a command without a name cannot be
    /// dispatched or completed.
    pub fn command(mut self, aliases: &[&str], usage: &str, description: &str) -> Self {
        assert!(!aliases.is_empty(), "a command needs at least one alias");
        self.registry.commands.push(CommandSpec {
            aliases: aliases.iter().map(|s| s.to_string()).collect(),
            usage: usage.to_string(),
            description: description.to_string(),
        });
        self
    }

    /// Registers flag completions shared by the named commands.
    pub fn flags(mut self, commands: &[&str], values: &[&str]) -> Self {
        self.registry.flags.push(FlagEntry {
            commands: commands.iter().map(|s| s.to_string()).collect(),
            values: values.iter().map(|s| s.to_string()).collect(),
        });
        self
    }

    pub fn build(self) -> Registry {
        self.registry
    }
}

/// Builder pre-populated with the built-in command set. Callers extend it
/// with their own commands before building.
pub fn base() -> RegistryBuilder {
    Registry::builder()
        .command(&["exit", "quit", "q"], "", "Exit the shell.")
        .command(&["clear", "cls"], "", "Clear the screen.")
        .command(&["history", "h"], "", "Show the history of commands.")
        .command(
            &["history_clear", "hc"],
            "",
            "Clear the history of commands and removes the log file.",
        )
        .command(&["help"], "", "Show the help menu.")
}
