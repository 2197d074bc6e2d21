//! Hook subcommands.

use std::collections::BTreeMap;

use anyhow::{Context, anyhow};
use clap::{Args, Subcommand};
use octohook_github::{CreateHook, EditHook, HookEvent, HooksResource};
use serde_json::Value;

use crate::TRACING_TARGET_COMMAND;

/// Repository a command operates on.
#[derive(Debug, Clone, Args)]
pub struct RepoArgs {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
}

/// Repository and hook a command operates on.
#[derive(Debug, Clone, Args)]
pub struct HookArgs {
    #[clap(flatten)]
    pub repo: RepoArgs,
    /// Hook identifier
    pub hook_id: u64,
}

/// Fields shared by `create` and `edit`.
#[derive(Debug, Clone, Args)]
pub struct HookBodyArgs {
    /// Service name of the hook
    #[arg(long, default_value = "web")]
    pub name: String,

    /// Service config entry as KEY=VALUE (repeatable)
    #[arg(long = "config", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub config: Vec<(String, String)>,

    /// Event to subscribe to (repeatable)
    #[arg(long = "event", value_name = "EVENT")]
    pub events: Vec<String>,

    /// Create or leave the hook inactive
    #[arg(long)]
    pub inactive: bool,
}

impl HookBodyArgs {
    fn config_map(&self) -> BTreeMap<String, String> {
        self.config.iter().cloned().collect()
    }
}

/// Hook operation to run.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the hooks of a repository
    List(RepoArgs),
    /// Show a single hook
    Get(HookArgs),
    /// Create a hook
    Create {
        #[clap(flatten)]
        repo: RepoArgs,
        #[clap(flatten)]
        body: HookBodyArgs,
    },
    /// Edit a hook
    Edit {
        #[clap(flatten)]
        hook: HookArgs,
        #[clap(flatten)]
        body: HookBodyArgs,
        /// Event to add to the current set (repeatable)
        #[arg(long = "add-event", value_name = "EVENT")]
        add_events: Vec<String>,
        /// Event to remove from the current set (repeatable)
        #[arg(long = "remove-event", value_name = "EVENT")]
        remove_events: Vec<String>,
    },
    /// Delete a hook
    Delete(HookArgs),
    /// Trigger a test delivery for the latest push
    Test(HookArgs),
    /// Send a ping event to a hook
    Ping(HookArgs),
    /// Print the event names a hook can subscribe to
    Events,
}

impl Command {
    /// Returns the command name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::List(_) => "list",
            Self::Get(_) => "get",
            Self::Create { .. } => "create",
            Self::Edit { .. } => "edit",
            Self::Delete(_) => "delete",
            Self::Test(_) => "test",
            Self::Ping(_) => "ping",
            Self::Events => "events",
        }
    }

    /// Runs the command and returns the JSON to print, if any.
    pub async fn execute(self, hooks: &HooksResource) -> anyhow::Result<Option<Value>> {
        tracing::debug!(
            target: TRACING_TARGET_COMMAND,
            command = self.name(),
            "Running command"
        );

        let output = match self {
            Self::List(RepoArgs { owner, repo }) => Some(hooks.get_list(&owner, &repo).await?),
            Self::Get(args) => {
                let RepoArgs { owner, repo } = &args.repo;
                Some(hooks.get(owner, repo, args.hook_id).await?)
            }
            Self::Create { repo, body } => {
                let request = CreateHook::new(&body.name)
                    .with_config_map(body.config_map())
                    .with_events(body.events)
                    .with_active(!body.inactive);
                Some(hooks.create(&repo.owner, &repo.repo, &request).await?)
            }
            Self::Edit {
                hook,
                body,
                add_events,
                remove_events,
            } => {
                let request = EditHook::new(&body.name)
                    .with_config_map(body.config_map())
                    .with_events(body.events)
                    .with_add_events(add_events)
                    .with_remove_events(remove_events)
                    .with_active(!body.inactive);
                let RepoArgs { owner, repo } = &hook.repo;
                Some(hooks.edit(owner, repo, hook.hook_id, &request).await?)
            }
            Self::Delete(args) => {
                let RepoArgs { owner, repo } = &args.repo;
                hooks.delete(owner, repo, args.hook_id).await?
            }
            Self::Test(args) => {
                let RepoArgs { owner, repo } = &args.repo;
                hooks.test(owner, repo, args.hook_id).await?
            }
            Self::Ping(args) => {
                let RepoArgs { owner, repo } = &args.repo;
                hooks.ping(owner, repo, args.hook_id).await?
            }
            Self::Events => Some(Value::from(HookEvent::ALLOWED.to_vec())),
        };

        Ok(output)
    }
}

/// Parses a `KEY=VALUE` pair.
fn parse_key_value(input: &str) -> anyhow::Result<(String, String)> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| anyhow!("expected KEY=VALUE, got `{input}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(anyhow!("config key cannot be empty"));
    }
    Ok((key.to_owned(), value.to_owned()))
}

/// Pretty-prints command output.
pub fn render(output: &Value) -> anyhow::Result<String> {
    serde_json::to_string_pretty(output).context("failed to render output")
}
