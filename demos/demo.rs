use std::fs::File;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use simplelog::{Config, LevelFilter, WriteLogger};

use collapsible::{Collapsible, CollapsibleConfig, ContentSize, Node};

const FRAME: Duration = Duration::from_millis(50);

fn main() -> std::io::Result<()> {
    // Set up file logging
    let log_file = File::create("demo.log")?;
    WriteLogger::init(LevelFilter::Trace, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let content = Arc::new(Mutex::new(
        Node::new()
            .id("details")
            .child(Node::new().id("summary-link").focusable(true))
            .child(Node::new().id("copy-button").focusable(true)),
    ));
    let size = ContentSize::new(120.0);

    let collapsible = Collapsible::mount(
        CollapsibleConfig::new()
            .collapsed(true)
            .negative_margin_while_collapsed("-8px"),
        Arc::clone(&content),
        &size,
        Instant::now(),
    );

    println!("mounted collapsed: {:?}", collapsible.style());

    println!("\n-- expand --");
    collapsible.set_collapsed(false, Instant::now());
    run_until_settled(&collapsible);

    println!("\n-- organic growth (snaps, no animation) --");
    size.set(180.0);
    println!("{:?}", collapsible.style());

    println!("\n-- collapse --");
    collapsible.set_collapsed(true, Instant::now());
    run_until_settled(&collapsible);

    println!("\nfinal: {:?}", collapsible.style());
    Ok(())
}

/// Advance frames until the in-flight transition settles, printing the
/// derived style once per frame.
fn run_until_settled(collapsible: &Collapsible) {
    while let Some(deadline) = collapsible.next_deadline() {
        collapsible.tick(Instant::now());
        let style = collapsible.style();
        println!(
            "height={:>10} classes={:?}",
            style.height.to_string(),
            style.classes()
        );
        if Instant::now() >= deadline {
            break;
        }
        thread::sleep(FRAME);
    }
    collapsible.tick(Instant::now());
}
