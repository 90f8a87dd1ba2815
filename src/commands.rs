use std::{io::Write, path::Path};

use anyhow::{Context, Result};
use serde::Serialize;

use deskpaper::{
    backend::{PlatformBackend, Rect},
    data_loaders::config::DeskConfig,
    desktop::{Desktop, Target, Wallpaper},
    info, Error, Style,
};

use crate::args::Cli;

pub fn run<B: PlatformBackend>(
    cli: &Cli,
    config: &DeskConfig,
    desktop: &Desktop<B>,
    out: &mut impl Write,
) -> Result<()> {
    if cli.list {
        return list_screens(desktop, cli.json, out);
    }

    let screen = cli
        .screen
        .as_deref()
        .or(config.defaults.screen.as_deref());
    let style = cli.style.as_deref().map(Style::parse);

    match (&cli.path, style) {
        (None, None) | (None, Some(Style::Current)) => print_current(desktop, screen, out),
        (None, Some(style)) => apply_style(desktop, screen, &style),
        (Some(path), style) => {
            let style = style.unwrap_or_else(|| config.defaults.style.clone());
            set_wallpaper(desktop, screen, path, style)
        }
    }
}

fn print_current<B: PlatformBackend>(
    desktop: &Desktop<B>,
    screen: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let target = select_target(desktop, screen)?;
    let wallpaper = target.wallpaper().context("Could not get wallpaper path")?;
    writeln!(out, "{}", wallpaper.path.display())?;
    Ok(())
}

fn apply_style<B: PlatformBackend>(
    desktop: &Desktop<B>,
    screen: Option<&str>,
    style: &Style,
) -> Result<()> {
    let target = select_target(desktop, screen)?;
    let applied = match &target {
        Target::WholeDesktop(desktop) => desktop.set_style(style),
        Target::Monitor(_) => target
            .wallpaper()
            .and_then(|current| target.set_wallpaper(&Wallpaper::new(current.path, style.clone()))),
    };
    applied.context("Could not set wallpaper style")?;

    info!("[CLI] Style {} applied to {}", style, target.identifier());
    Ok(())
}

fn set_wallpaper<B: PlatformBackend>(
    desktop: &Desktop<B>,
    screen: Option<&str>,
    path: &Path,
    style: Style,
) -> Result<()> {
    let target = select_target(desktop, screen)?;
    target
        .set_wallpaper(&Wallpaper::new(path, style))
        .context("Could not set wallpaper")?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct ScreenEntry {
    identifier: String,
    index: usize,
    name: String,
    rect: Rect,
    primary: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    wallpaper: Option<Wallpaper>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// One line per screen. A screen whose wallpaper cannot be read is reported
/// inline and the listing carries on.
fn list_screens<B: PlatformBackend>(
    desktop: &Desktop<B>,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let screens = desktop.screens().context("Could not list screens")?;

    if json {
        let entries: Vec<ScreenEntry> = screens
            .iter()
            .map(|screen| {
                let monitor = screen.monitor();
                let (wallpaper, error) = match screen.wallpaper() {
                    Ok(wallpaper) => (Some(wallpaper), None),
                    Err(err) => (None, Some(describe(err))),
                };
                ScreenEntry {
                    identifier: screen.identifier(),
                    index: screen.index(),
                    name: monitor.name.clone(),
                    rect: monitor.rect,
                    primary: monitor.primary,
                    wallpaper,
                    error,
                }
            })
            .collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&entries)?)?;
        return Ok(());
    }

    for screen in &screens {
        match screen.wallpaper() {
            Ok(wallpaper) => writeln!(out, "{}  {}", screen.identifier(), wallpaper.path.display())?,
            Err(err) => writeln!(
                out,
                "{}  <could not get wallpaper:{}>",
                screen.identifier(),
                describe(err)
            )?,
        }
    }
    Ok(())
}

fn select_target<'a, B: PlatformBackend>(
    desktop: &'a Desktop<B>,
    screen: Option<&str>,
) -> Result<Target<'a, B>> {
    desktop.target(screen).map_err(|err| match err {
        Error::Enumeration(_) => anyhow::Error::new(err).context("Could not enumerate screens"),
        other => other.into(),
    })
}

fn describe(err: Error) -> String {
    format!("{:#}", anyhow::Error::new(err))
}
