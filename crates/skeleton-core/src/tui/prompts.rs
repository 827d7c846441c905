//! Charm-style CLI prompts using cliclack

use crate::modules::{normalize_module_name, presets::dedupe, ModulePresets};
use crate::product::ProductConfig;
use crate::project::{AppFlavor, InitResult, ProjectOptions, ProjectShape, Scaffolder};
use crate::registry::{RegistryLoader, RegistrySnapshot, RegistrySource};
use crate::templates::TemplateSource;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

/// CLI arguments for the init command
#[derive(Debug, Clone, Default)]
pub struct InitArgs {
    /// Project options as given on the command line
    pub options: ProjectOptions,

    /// Local directory to use for templates instead of the embedded ones
    pub template_dir: Option<PathBuf>,

    /// Never prompt; fail if required input is missing
    pub yes: bool,
}

/// Run the init flow, prompting for whatever the arguments leave open
pub async fn run<C: ProductConfig>(config: &C, args: InitArgs) -> Result<()> {
    cliclack::intro(config.display_name())?;

    let mut options = args.options;

    let presets = ModulePresets::parse(config.module_presets(), config.module_prefix())
        .context("Failed to load embedded module presets")?;

    // Step 1a: Preset given on the command line
    if let Some(preset_id) = options.apply_preset(&presets)? {
        cliclack::log::info(format!("Using module preset: {}", preset_id))?;
    }

    let has_modules = options.modules.iter().any(|m| !m.trim().is_empty());
    if !has_modules {
        if args.yes {
            anyhow::bail!("No modules selected. Pass --module or --module-preset.");
        }
        // Step 1b: Interactive project setup
        prompt_project(config, &mut options)?;
        let snapshot = load_registry(config, &options.registry_url).await?;
        options.modules = prompt_modules(config, &presets, &options, &snapshot)?;
    }

    // Step 2: Validate
    let spec = options.validate()?;

    // Step 3: Setup scaffolder
    let mut scaffolder = Scaffolder::from_config(config)?;
    if let Some(dir) = &args.template_dir {
        cliclack::log::info(format!("Using local templates from {}", dir.display()))?;
        scaffolder = scaffolder.with_templates(TemplateSource::local(dir.clone()));
    }

    // Step 4: Generate
    let spinner = cliclack::spinner();
    spinner.start("Generating skeleton...");
    let result = match scaffolder.run(&spec, &options.modules).await {
        Ok(result) => result,
        Err(e) => {
            spinner.stop("Generation failed");
            return Err(e.into());
        }
    };
    spinner.stop(format!(
        "Created {} files in {}",
        result.files.len() + 1,
        result.output_dir.display()
    ));

    // Step 5: Summary and next steps
    print_modules(&result)?;
    print_next_steps(config, &result, &spec)?;

    Ok(())
}

fn prompt_project<C: ProductConfig>(config: &C, options: &mut ProjectOptions) -> Result<()> {
    let project_type: &str = cliclack::select("Project type")
        .item("Application", "Application", "")
        .item("Module", "Module", "")
        .initial_value(initial_project_type(options))
        .interact()?;
    options.project_type = project_type.to_string();

    if project_type == "Application" {
        let initial = AppFlavor::parse(&options.app_type).unwrap_or(AppFlavor::Daal);
        let flavor: AppFlavor = cliclack::select("Application type")
            .item(AppFlavor::Daal, AppFlavor::Daal.display_name(), "")
            .item(AppFlavor::Feo, AppFlavor::Feo.display_name(), "")
            .initial_value(initial)
            .interact()?;
        options.app_type = flavor.as_str().to_string();
    }

    let default_name = non_empty_or(&options.name, config.default_project_name());
    let name: String = cliclack::input("Project name")
        .placeholder(&default_name)
        .default_input(&default_name)
        .interact()?;
    options.name = name;

    let default_dir = non_empty_or(&options.target_dir, config.default_target_dir());
    let dir: String = cliclack::input("Target directory")
        .placeholder(&default_dir)
        .default_input(&default_dir)
        .interact()?;
    options.target_dir = dir;

    options.include_devcontainer = cliclack::confirm("Use .devcontainer?")
        .initial_value(options.include_devcontainer)
        .interact()?;

    Ok(())
}

async fn load_registry<C: ProductConfig>(config: &C, url: &str) -> Result<RegistrySnapshot> {
    let spinner = cliclack::spinner();
    spinner.start("Loading known-good modules...");

    let source = RegistrySource::parse(url)?;
    match RegistryLoader::from_config(config).load(&source).await {
        Ok(snapshot) => {
            spinner.stop(format!(
                "Loaded {} modules ({})",
                snapshot.modules.len(),
                snapshot.timestamp
            ));
            Ok(snapshot)
        }
        Err(e) => {
            spinner.stop("Failed to load known-good modules");
            Err(e.into())
        }
    }
}

fn prompt_modules<C: ProductConfig>(
    config: &C,
    presets: &ModulePresets,
    options: &ProjectOptions,
    snapshot: &RegistrySnapshot,
) -> Result<Vec<String>> {
    let shape: ProjectShape = options.shape()?;
    let applicable = presets.applicable(shape);

    let mut modules = Vec::new();
    if !applicable.is_empty() {
        let mut select = cliclack::select("Module preset").item(0usize, "Custom", "select manually");
        for (idx, preset) in applicable.iter().enumerate() {
            select = select.item(idx + 1, &preset.label, &preset.id);
        }
        let selected: usize = select.interact()?;

        if selected > 0 {
            let preset = applicable[selected - 1];
            if preset.modules.is_empty() {
                anyhow::bail!("Selected preset '{}' has no modules", preset.id);
            }
            modules = preset.modules.clone();

            let add_more: bool = cliclack::confirm("Add more modules on top of the preset?")
                .initial_value(false)
                .interact()?;
            if !add_more {
                return Ok(modules);
            }
        }
    }

    modules.extend(select_modules(config, snapshot, &modules)?);
    let modules = dedupe(modules);
    if modules.is_empty() {
        anyhow::bail!("No modules selected");
    }
    Ok(modules)
}

/// Multiselect over registry modules, plus free-form names not in the registry
fn select_modules<C: ProductConfig>(
    config: &C,
    snapshot: &RegistrySnapshot,
    already: &[String],
) -> Result<Vec<String>> {
    let mut selected: Vec<String> = Vec::new();

    let available: Vec<&str> = snapshot
        .module_names()
        .into_iter()
        .filter(|n| !already.iter().any(|a| a == n))
        .collect();

    if !available.is_empty() {
        let mut multi = cliclack::multiselect("Select modules");
        for name in &available {
            let version = snapshot
                .get(name)
                .map(|m| m.version.clone())
                .unwrap_or_default();
            multi = multi.item(name.to_string(), *name, version);
        }
        selected = multi.required(false).interact()?;
    } else if snapshot.is_empty() {
        cliclack::log::warning("No modules in the known-good registry")?;
    }

    let extra: String = cliclack::input("Additional modules (comma-separated, optional)")
        .placeholder("e.g. score_foo, bar")
        .required(false)
        .default_input("")
        .interact()?;

    for name in extra.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let normalized = normalize_module_name(config.module_prefix(), name);
        if snapshot.get(&normalized).is_none() {
            let add: bool = cliclack::confirm(format!(
                "Module '{}' is not in the known-good registry. Add anyway?",
                normalized
            ))
            .initial_value(false)
            .interact()?;
            if !add {
                continue;
            }
        }
        selected.push(normalized);
    }

    Ok(selected)
}

/// Project type preselected in the prompt; falls back to `Application`
fn initial_project_type(options: &ProjectOptions) -> &'static str {
    options
        .shape()
        .map(|shape| shape.project_type())
        .unwrap_or("Application")
}

fn non_empty_or(value: &str, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

fn print_modules(result: &InitResult) -> Result<()> {
    let lines: Vec<String> = result
        .selected_modules
        .iter()
        .map(|(name, info)| {
            let pin = if info.branch.is_empty() {
                info.version.clone()
            } else {
                format!("{} ({}@{})", info.version, info.branch, short_hash(&info.hash))
            };
            format!("{} {}", name.bold(), pin.dimmed())
        })
        .collect();
    cliclack::note("Modules", lines.join("\n"))?;
    Ok(())
}

fn short_hash(hash: &str) -> &str {
    hash.get(..12).unwrap_or(hash)
}

fn print_next_steps<C: ProductConfig>(
    config: &C,
    result: &InitResult,
    spec: &crate::project::ProjectSpec,
) -> Result<()> {
    let steps = config.next_steps(&result.output_dir, spec);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy hacking!")?;

    Ok(())
}
