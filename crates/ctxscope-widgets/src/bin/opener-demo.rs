//! Walks the canonical opener nesting scenarios and prints what each
//! trigger actually toggled.

use anyhow::Result;
use colored::Colorize;
use ctxscope::Tree;
use ctxscope_widgets::alert_opener::{AlertOpener, AlertOpenerTrigger};
use ctxscope_widgets::opener::{Opener, OpenerContent, OpenerTrigger};
use ctxscope_widgets::scoped_alert_opener::{
    alert_opener_scope, AlertContentSize, ScopedAlertOpener, ScopedAlertOpenerContent,
    ScopedAlertOpenerTrigger,
};
use ctxscope_widgets::scoped_opener::{ScopedOpener, ScopedOpenerContent, ScopedOpenerTrigger};

fn main() -> Result<()> {
    env_logger::init();

    single_opener()?;
    single_alert_opener()?;
    opener_in_alert_opener()?;
    scoped_opener_in_scoped_alert_opener()?;
    Ok(())
}

fn heading(text: &str) {
    println!("\n{}", text.bold());
}

fn state(label: &str, open: bool) {
    let rendered = if open { "open".green() } else { "closed".red() };
    println!("  {label}: {rendered}");
}

fn single_opener() -> Result<()> {
    heading("single opener");
    let opener = Opener::new();

    let tree = Tree::new();
    opener.render(&tree, |tree| OpenerTrigger::press(tree))?;
    state("opener", opener.is_open());

    let tree = Tree::new();
    let content = opener.render(&tree, |tree| OpenerContent::render(tree, |_| "opener content"))?;
    if let Some(text) = content {
        println!("  {}", text.dimmed());
    }
    Ok(())
}

fn single_alert_opener() -> Result<()> {
    heading("single alert opener");
    let alert = AlertOpener::new();

    let tree = Tree::new();
    alert.render(&tree, |tree| AlertOpenerTrigger::press(tree))?;
    state("alert opener", alert.is_open());
    Ok(())
}

fn opener_in_alert_opener() -> Result<()> {
    heading("opener in alert opener (shared unscoped slot)");
    let alert = AlertOpener::new();
    let opener = Opener::new();

    // Open the plain opener so the alert trigger inside its content shows.
    let tree = Tree::new();
    alert.render(&tree, |tree| {
        opener.render(tree, |tree| OpenerTrigger::press(tree))
    })?;
    state("plain opener", opener.is_open());

    // Pressing the alert trigger resolves the nearest root (the plain
    // opener), so the alert never moves.
    let tree = Tree::new();
    let pressed = alert.render(&tree, |tree| {
        opener.render(tree, |tree| {
            OpenerContent::render(tree, |tree| AlertOpenerTrigger::press(tree))
        })
    })?;
    if let Some(result) = pressed {
        result?;
    }
    state("alert opener", alert.is_open());
    state("plain opener", opener.is_open());
    println!(
        "  {}",
        "the alert trigger toggled the plain opener instead of the alert".yellow()
    );
    Ok(())
}

fn scoped_opener_in_scoped_alert_opener() -> Result<()> {
    heading("scoped opener in scoped alert opener");
    let alert = ScopedAlertOpener::new();
    let opener = ScopedOpener::new();
    let content = ScopedAlertOpenerContent::new();

    // Open the nested opener.
    let tree = Tree::new();
    alert.render(&tree, None, |tree| {
        opener.render(tree, None, |tree| ScopedOpenerTrigger::press(tree, None))
    })?;
    state("nested opener", opener.is_open());

    // The alert trigger inside the opener content is pinned to the alert's
    // own opener root, so only the alert toggles.
    let tree = Tree::new();
    let pressed = alert.render(&tree, None, |tree| {
        opener.render(tree, None, |tree| {
            ScopedOpenerContent::render(tree, None, |tree| {
                ScopedAlertOpenerTrigger::press(tree, None)
            })
        })
    })?;
    if let Some(result) = pressed {
        result?;
    }
    state("alert opener", alert.is_open());
    state("nested opener", opener.is_open());

    // With the alert open, its content publishes its measured size.
    let tree = Tree::new();
    let scope = alert_opener_scope().resolve(&tree, None);
    let measured = alert.render(&tree, Some(&scope), |tree| {
        content.render(tree, Some(&scope), (220.0, 48.0), |tree| {
            AlertContentSize::read(tree, Some(&scope))
        })
    })?;
    if let Some(size) = measured {
        let (width, height) = size?;
        println!("  alert content size: {width:.2} x {height:.2}");
    }
    Ok(())
}
