//! scorex - Bazel project skeletons for S-CORE modules and applications

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use include_dir::{include_dir, Dir};
use skeleton_core::registry::registry_url_from_env;
use skeleton_core::tui::InitArgs;
use skeleton_core::{ModulePresets, ProductConfig, ProjectOptions, ProjectShape, ProjectSpec};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

static TEMPLATES: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/templates");

const MODULE_PRESETS: &str = include_str!("../module_presets.yaml");

/// S-CORE product configuration
#[derive(Clone)]
pub struct ScorexConfig;

impl ProductConfig for ScorexConfig {
    fn name(&self) -> &'static str {
        "scorex"
    }

    fn display_name(&self) -> &'static str {
        "S-CORE skeleton"
    }

    fn module_prefix(&self) -> &'static str {
        "score_"
    }

    fn github_owner(&self) -> &'static str {
        "eclipse-score"
    }

    fn default_registry_url(&self) -> &'static str {
        "https://raw.githubusercontent.com/eclipse-score/reference_integration/main/known_good.json"
    }

    fn registry_url_env(&self) -> &'static str {
        "SCOREX_KNOWN_GOOD_URL"
    }

    fn default_project_name(&self) -> &'static str {
        "score_app"
    }

    fn default_tool_version(&self) -> &'static str {
        "8.3.0"
    }

    fn templates(&self) -> &'static Dir<'static> {
        &TEMPLATES
    }

    fn module_presets(&self) -> &'static str {
        MODULE_PRESETS
    }

    fn config_file_name(&self) -> &'static str {
        "scorex.json"
    }

    fn next_steps(&self, dir: &Path, spec: &ProjectSpec) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        if current.as_deref() != Some(dir) {
            steps.push(format!("cd {}", dir.display()));
        }

        if spec.include_optional_dir {
            steps.push("Reopen the folder in the dev container".to_string());
        }

        steps.push("bazel build //...".to_string());

        match spec.shape {
            ProjectShape::Module => steps.push("bazel test //...".to_string()),
            ProjectShape::Application(_) => steps.push(format!("bazel run //:{}", spec.name)),
        }

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "scorex")]
#[command(about = "CLI for generating S-CORE Bazel project skeletons")]
#[command(version)]
pub struct Args {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project skeleton
    Init(InitCliArgs),
    /// List the built-in module presets
    Presets,
}

#[derive(Parser, Debug, Default)]
pub struct InitCliArgs {
    /// Modules to include (repeatable or comma-separated; the score_ prefix is optional)
    #[arg(short, long = "module", value_delimiter = ',')]
    pub modules: Vec<String>,

    /// Project name (also the name of the created directory)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Directory the project directory is created in
    #[arg(short, long)]
    pub dir: Option<String>,

    /// Known-good registry document (URL or local path)
    #[arg(long = "known-good-url")]
    pub known_good_url: Option<String>,

    /// Bazel version written to .bazelversion
    #[arg(long = "bazel-version")]
    pub bazel_version: Option<String>,

    /// Project type: Application or Module
    #[arg(long = "project-type", default_value = "Application")]
    pub project_type: String,

    /// Application type: daal or feo
    #[arg(long = "app-type", default_value = "daal")]
    pub app_type: String,

    /// Include a .devcontainer setup
    #[arg(long)]
    pub devcontainer: bool,

    /// Use a predefined module list (see `scorex presets`)
    #[arg(long = "module-preset")]
    pub module_preset: Option<String>,

    /// Local directory to use for templates instead of the embedded ones (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Never prompt; fail if modules are missing (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl InitCliArgs {
    /// Fill unset flags from the product defaults
    fn into_init_args<C: ProductConfig>(self, config: &C) -> InitArgs {
        let options = ProjectOptions {
            modules: self.modules,
            name: self
                .name
                .unwrap_or_else(|| config.default_project_name().to_string()),
            target_dir: self
                .dir
                .unwrap_or_else(|| config.default_target_dir().to_string()),
            registry_url: self
                .known_good_url
                .unwrap_or_else(|| registry_url_from_env(config)),
            tool_version: self
                .bazel_version
                .unwrap_or_else(|| config.default_tool_version().to_string()),
            project_type: self.project_type,
            app_type: self.app_type,
            include_devcontainer: self.devcontainer,
            module_preset: self.module_preset,
        };

        InitArgs {
            options,
            template_dir: self.template_dir,
            yes: self.yes,
        }
    }
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("scorex=debug,skeleton_core=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("scorex=warn,skeleton_core=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn print_presets<C: ProductConfig>(config: &C) -> Result<()> {
    let presets = ModulePresets::parse(config.module_presets(), config.module_prefix())?;

    for preset in presets.all() {
        let scope = match (&preset.project_type, &preset.app_type) {
            (Some(project), Some(app)) => format!("{} / {}", project, app),
            (Some(project), None) => project.clone(),
            (None, Some(app)) => format!("any / {}", app),
            (None, None) => "any".to_string(),
        };
        println!("{}  {}", preset.id.bold(), format!("({})", scope).dimmed());
        if preset.label != preset.id {
            println!("    {}", preset.label);
        }
        println!("    {}", preset.modules.join(", ").cyan());
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_tracing(args.debug);
    tracing::debug!(version = CLI_VERSION, "scorex starting");

    let config = ScorexConfig;

    match args.command {
        Some(Command::Presets) => print_presets(&config),
        Some(Command::Init(init_args)) => {
            let result = skeleton_core::run(&config, init_args.into_init_args(&config)).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
        None => {
            // No subcommand provided, default to interactive init
            let init_args = InitCliArgs {
                project_type: "Application".to_string(),
                app_type: "daal".to_string(),
                ..Default::default()
            };
            let result = skeleton_core::run(&config, init_args.into_init_args(&config)).await;

            let _ = console::Term::stderr().show_cursor();

            result
        }
    }
}
