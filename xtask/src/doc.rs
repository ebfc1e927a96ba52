use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;
use std::time::Instant;

/// Embedded target the no_std docs are rendered for.
const EMBEDDED_TARGET: &str = "thumbv7em-none-eabihf";

/// One `cargo doc` invocation.
struct DocBuild {
    label: &'static str,
    args: &'static [&'static str],
    /// Where the panel crate's index lands.
    index: &'static str,
}

const BUILDS: &[DocBuild] = &[
    DocBuild {
        label: "host (std + tracing, with test mocks)",
        args: &[
            "doc",
            "-p",
            "platform",
            "-p",
            "panel-specs",
            "-p",
            "panel",
            "--no-deps",
            "--features",
            "panel/std,panel/tracing,platform/std,panel-specs/serde",
        ],
        index: "target/doc/panel/index.html",
    },
    DocBuild {
        label: "embedded (no_std + defmt)",
        args: &[
            "doc",
            "-p",
            "platform",
            "-p",
            "panel-specs",
            "-p",
            "panel",
            "--no-deps",
            "--target",
            EMBEDDED_TARGET,
            "--features",
            "panel/defmt",
        ],
        index: "target/thumbv7em-none-eabihf/doc/panel/index.html",
    },
];

pub fn run(open: bool) -> Result<()> {
    println!();
    println!("{}", "📚 Building driver documentation...".cyan().bold());
    println!();

    let total_start = Instant::now();

    for build in BUILDS {
        println!("{}", format!("  Documenting {}...", build.label).cyan());
        let start = Instant::now();

        let output = Command::new("cargo")
            .args(build.args)
            .output()
            .with_context(|| format!("Failed to document {}", build.label))?;

        if !output.status.success() {
            eprintln!("{}", format!("  ✗ {} docs failed", build.label).red().bold());
            eprintln!();
            eprintln!("{}", String::from_utf8_lossy(&output.stderr));
            anyhow::bail!("{} documentation failed", build.label);
        }

        println!(
            "{}",
            format!(
                "  ✓ {} in {:.2}s -> {}",
                build.label,
                start.elapsed().as_secs_f64(),
                build.index
            )
            .green()
        );
    }

    println!();
    println!(
        "{}",
        format!(
            "✓ Documentation built in {:.2}s",
            total_start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );

    if open {
        // Host docs include the recording mocks used in the examples.
        let status = Command::new("cargo")
            .args(["doc", "-p", "panel", "--no-deps", "--features", "std,tracing", "--open"])
            .status()
            .context("Failed to open documentation")?;
        if !status.success() {
            anyhow::bail!("Opening documentation failed");
        }
    }

    println!();

    Ok(())
}
