use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use collapsible::{
    find_node, Collapsible, CollapsibleConfig, ContentSize, HeightExpr, Node,
};

const FULL: Duration = Duration::from_millis(350);

fn content() -> Arc<Mutex<Node>> {
    Arc::new(Mutex::new(
        Node::new()
            .id("root")
            .child(Node::new().id("link").focusable(true))
            .child(Node::new().id("button").focusable(true)),
    ))
}

// =============================================================================
// Mounting and Initial Measurement
// =============================================================================

#[test]
fn test_mount_expanded_uses_initial_measurement() {
    let size = ContentSize::new(100.0);
    let collapsible = Collapsible::mount(
        CollapsibleConfig::new(),
        content(),
        &size,
        Instant::now(),
    );

    assert!(!collapsible.is_collapsed());
    assert!(collapsible.fits_content());
    assert_eq!(collapsible.current_height(), 100.0);
    assert_eq!(collapsible.style().height, HeightExpr::FitContent);
}

#[test]
fn test_mount_collapsed_starts_at_zero() {
    let size = ContentSize::new(100.0);
    let collapsible = Collapsible::mount(
        CollapsibleConfig::new().collapsed(true),
        content(),
        &size,
        Instant::now(),
    );

    assert!(collapsible.is_collapsed());
    assert!(!collapsible.fits_content());
    assert_eq!(collapsible.current_height(), 0.0);
    assert_eq!(collapsible.style().height, HeightExpr::Px(0.0));
    assert!(collapsible.style().zero_height);
}

// =============================================================================
// Organic Size Changes
// =============================================================================

#[test]
fn test_organic_change_snaps_while_expanded() {
    let size = ContentSize::new(100.0);
    let collapsible = Collapsible::mount(
        CollapsibleConfig::new(),
        content(),
        &size,
        Instant::now(),
    );

    size.set(150.0);
    assert_eq!(collapsible.current_height(), 150.0);
    assert!(!collapsible.is_animating());
    assert_eq!(collapsible.style().height, HeightExpr::FitContent);
}

#[test]
fn test_organic_change_suppressed_while_collapsed() {
    let size = ContentSize::new(100.0);
    let collapsible = Collapsible::mount(
        CollapsibleConfig::new().collapsed(true),
        content(),
        &size,
        Instant::now(),
    );

    size.set(42.0);
    size.set(300.0);
    assert_eq!(collapsible.current_height(), 0.0);
    assert_eq!(collapsible.target_height(), 0.0);
    assert!(!collapsible.is_animating());
}

// =============================================================================
// Collapse / Expand Lifecycle
// =============================================================================

#[test]
fn test_collapse_animates_then_settles_at_zero() {
    let t0 = Instant::now();
    let size = ContentSize::new(100.0);
    let collapsible = Collapsible::mount(CollapsibleConfig::new(), content(), &size, t0);

    collapsible.set_collapsed(true, t0);
    assert!(collapsible.is_animating());
    let style = collapsible.style();
    assert!(style.animating);
    assert!(style.zero_height);
    assert!(style.clips_overflow());
    assert_eq!(style.classes(), vec!["animating", "zero-height"]);

    collapsible.tick(t0 + FULL);
    assert!(!collapsible.is_animating());
    assert!(!collapsible.fits_content());
    assert_eq!(collapsible.current_height(), 0.0);
    assert_eq!(collapsible.style().classes(), vec!["zero-height"]);
}

#[test]
fn test_expand_settles_into_fit_content() {
    let t0 = Instant::now();
    let size = ContentSize::new(200.0);
    let collapsible = Collapsible::mount(
        CollapsibleConfig::new().collapsed(true),
        content(),
        &size,
        t0,
    );

    collapsible.set_collapsed(false, t0);
    assert!(collapsible.is_animating());
    assert_eq!(collapsible.target_height(), 200.0);
    match collapsible.style().height {
        HeightExpr::Px(_) => {}
        other => panic!("expected pixel height mid-transition, got {other:?}"),
    }

    collapsible.tick(t0 + FULL);
    assert!(collapsible.fits_content());
    assert!(!collapsible.is_animating());
    assert_eq!(collapsible.current_height(), 200.0);
    assert_eq!(collapsible.style().height, HeightExpr::FitContent);

    // Growth after settling snaps without reanimating.
    size.set(250.0);
    assert_eq!(collapsible.current_height(), 250.0);
    assert!(!collapsible.is_animating());
}

#[test]
fn test_set_collapsed_unchanged_is_noop() {
    let t0 = Instant::now();
    let size = ContentSize::new(100.0);
    let collapsible = Collapsible::mount(CollapsibleConfig::new(), content(), &size, t0);

    collapsible.set_collapsed(false, t0);
    assert!(!collapsible.is_animating());
    assert!(collapsible.fits_content());
}

#[test]
fn test_toggle() {
    let t0 = Instant::now();
    let size = ContentSize::new(100.0);
    let collapsible = Collapsible::mount(CollapsibleConfig::new(), content(), &size, t0);

    collapsible.toggle(t0);
    assert!(collapsible.is_collapsed());
    collapsible.tick(t0 + FULL);

    collapsible.toggle(t0 + FULL);
    assert!(!collapsible.is_collapsed());
    collapsible.tick(t0 + FULL + FULL);
    assert_eq!(collapsible.current_height(), 100.0);
    assert!(collapsible.fits_content());
}

// =============================================================================
// Race: collapse before the expand settles
// =============================================================================

#[test]
fn test_collapse_before_expand_settles_keeps_fit_content_off() {
    let t0 = Instant::now();
    let size = ContentSize::new(200.0);
    let collapsible = Collapsible::mount(
        CollapsibleConfig::new().collapsed(true),
        content(),
        &size,
        t0,
    );

    collapsible.set_collapsed(false, t0);
    let t1 = t0 + Duration::from_millis(100);
    collapsible.set_collapsed(true, t1);

    // Past the superseded expand's deadline the collapse is still in
    // flight and fit-content must not have been restored.
    collapsible.tick(t0 + Duration::from_millis(320));
    assert!(collapsible.is_animating());
    assert!(!collapsible.fits_content());

    collapsible.tick(t1 + FULL);
    assert!(!collapsible.fits_content());
    assert_eq!(collapsible.current_height(), 0.0);
}

// =============================================================================
// Margin Behavior
// =============================================================================

#[test]
fn test_negative_margin_only_at_zero_height() {
    let t0 = Instant::now();
    let size = ContentSize::new(100.0);
    let collapsible = Collapsible::mount(
        CollapsibleConfig::new()
            .collapsed(true)
            .negative_margin_while_collapsed("-8px"),
        content(),
        &size,
        t0,
    );

    assert_eq!(collapsible.style().margin_bottom.as_deref(), Some("-8px"));

    // Expanding drops the margin immediately (target is non-zero).
    collapsible.set_collapsed(false, t0);
    assert_eq!(collapsible.style().margin_bottom, None);
    collapsible.tick(t0 + FULL);
    assert_eq!(collapsible.style().margin_bottom, None);

    // Collapsing re-applies it for the whole zero-height phase.
    collapsible.set_collapsed(true, t0 + FULL);
    assert_eq!(collapsible.style().margin_bottom.as_deref(), Some("-8px"));
    collapsible.tick(t0 + FULL + FULL);
    assert_eq!(collapsible.style().margin_bottom.as_deref(), Some("-8px"));
}

// =============================================================================
// Accessibility
// =============================================================================

#[test]
fn test_tab_stops_follow_visibility() {
    let t0 = Instant::now();
    let size = ContentSize::new(100.0);
    let tree = content();
    let collapsible = Collapsible::mount(
        CollapsibleConfig::new().collapsed(true),
        Arc::clone(&tree),
        &size,
        t0,
    );

    {
        let root = tree.lock().unwrap();
        assert!(!find_node(&root, "link").unwrap().tab_stop);
        assert!(!find_node(&root, "button").unwrap().tab_stop);
    }

    collapsible.set_collapsed(false, t0);
    {
        let root = tree.lock().unwrap();
        assert!(find_node(&root, "link").unwrap().tab_stop);
    }

    collapsible.set_collapsed(true, t0 + FULL);
    {
        let root = tree.lock().unwrap();
        assert!(!find_node(&root, "link").unwrap().tab_stop);
    }
}

#[test]
fn test_tab_stops_untouched_when_gated_off() {
    let t0 = Instant::now();
    let size = ContentSize::new(100.0);
    let tree = content();
    let collapsible = Collapsible::mount(
        CollapsibleConfig::new()
            .collapsed(true)
            .remove_from_tab_index_while_collapsed(false),
        Arc::clone(&tree),
        &size,
        t0,
    );

    for step in 0u32..4 {
        collapsible.toggle(t0 + FULL * step);
        let root = tree.lock().unwrap();
        assert!(find_node(&root, "link").unwrap().tab_stop);
        assert!(find_node(&root, "button").unwrap().tab_stop);
    }
}

#[test]
fn test_nodes_added_while_growing_join_tab_order_on_settle() {
    let t0 = Instant::now();
    let size = ContentSize::new(100.0);
    let tree = content();
    let collapsible = Collapsible::mount(
        CollapsibleConfig::new().collapsed(true),
        Arc::clone(&tree),
        &size,
        t0,
    );

    collapsible.set_collapsed(false, t0);

    // A focusable descendant appears mid-expansion, outside the tab order.
    {
        let mut root = tree.lock().unwrap();
        let mut late = Node::new().id("late").focusable(true);
        late.tab_stop = false;
        root.children.push(late);
    }

    collapsible.tick(t0 + FULL);
    let root = tree.lock().unwrap();
    assert!(find_node(&root, "late").unwrap().tab_stop);
}

// =============================================================================
// Subscription Lifecycle
// =============================================================================

#[test]
fn test_unmount_releases_observation() {
    let size = ContentSize::new(100.0);
    let collapsible = Collapsible::mount(
        CollapsibleConfig::new(),
        content(),
        &size,
        Instant::now(),
    );

    assert!(size.is_observed());
    drop(collapsible);
    assert!(!size.is_observed());
}

#[test]
fn test_clone_shares_state_and_observation() {
    let t0 = Instant::now();
    let size = ContentSize::new(100.0);
    let collapsible = Collapsible::mount(CollapsibleConfig::new(), content(), &size, t0);
    let handle = collapsible.clone();

    handle.set_collapsed(true, t0);
    assert!(collapsible.is_collapsed());

    drop(handle);
    assert!(size.is_observed());
    drop(collapsible);
    assert!(!size.is_observed());
}

#[test]
fn test_unmount_mid_transition_releases_observation() {
    let t0 = Instant::now();
    let size = ContentSize::new(100.0);
    let collapsible = Collapsible::mount(CollapsibleConfig::new(), content(), &size, t0);

    collapsible.set_collapsed(true, t0);
    assert!(collapsible.is_animating());
    drop(collapsible);

    assert!(!size.is_observed());
    // A later measurement goes nowhere.
    size.set(500.0);
}
