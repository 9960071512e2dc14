//! Scripted walk through a menu with a submenu.
//!
//! ```text
//! RUST_LOG=debug cargo run -p menu_demo -- show ArrowDown ArrowDown ArrowRight wait:400 Enter
//! ```
//!
//! Steps are key names (`ArrowDown`, `Escape`, `p`, ...), `show`, `hover`,
//! `leave`, `outside` or `wait:<ms>`. Pass `--rtl` first for right-to-left.

use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use folio_core::{Key, KeyEvent, ManualClock, Rect, Scheduler, TextDirection, with_text_direction};
use folio_menu::{
    Corner, FocusState, ItemHandle, MenuConfig, MenuController, StaticMeasure, SubMenu,
};

const DEFAULT_SCRIPT: &[&str] = &[
    "show",
    "ArrowDown",
    "ArrowDown",
    "ArrowDown",
    "ArrowDown",
    "ArrowRight",
    "ArrowDown",
    "Enter",
];

#[derive(Debug)]
enum Step {
    Key(Key),
    Wait(u64),
    Show,
    Hover,
    Leave,
    Outside,
}

fn parse_step(s: &str) -> Result<Step> {
    let step = match s {
        "show" => Step::Show,
        "hover" => Step::Hover,
        "leave" => Step::Leave,
        "outside" => Step::Outside,
        _ => {
            if let Some(ms) = s.strip_prefix("wait:") {
                Step::Wait(ms.parse().with_context(|| format!("bad wait step {s:?}"))?)
            } else {
                Step::Key(s.parse()?)
            }
        }
    };
    Ok(step)
}

fn describe(menu: &MenuController) -> String {
    let focused = menu
        .focused_item()
        .map(|i| i.label())
        .unwrap_or_else(|| "-".into());
    format!(
        "open={} focus={focused} pos=({}, {})",
        menu.is_open(),
        menu.position().top,
        menu.position().left
    )
}

fn run(steps: &[Step]) -> Result<()> {
    let clock = Rc::new(ManualClock::starting_now());
    let scheduler = Rc::new(Scheduler::new(clock.clone()));

    let menu = MenuController::new(
        MenuConfig::default()
            .anchor_corner(Corner::EndStart)
            .default_focus(FocusState::ListRoot),
        scheduler.clone(),
    );
    menu.set_measure(Rc::new(StaticMeasure {
        anchor: Some(Rect::new(24.0, 16.0, 96.0, 32.0)),
        menu: Some(Rect::new(0.0, 0.0, 160.0, 120.0)),
    }));
    menu.on_select(|item| println!("selected {}", item.label()));
    menu.on_close(|reason| println!("closed: {reason:?}"));

    let items: Vec<ItemHandle> = ["Cut", "Copy", "Paste"].into_iter().map(ItemHandle::new).collect();
    for item in &items {
        menu.register_item(item);
    }
    let share = SubMenu::new(&menu, "Share", MenuConfig::default());
    let share_items: Vec<ItemHandle> = ["Email", "Link"].into_iter().map(ItemHandle::new).collect();
    for item in &share_items {
        share.menu().register_item(item);
    }

    for step in steps {
        match step {
            Step::Show => menu.show(),
            Step::Hover => share.on_hover_enter(),
            Step::Leave => share.on_hover_leave(),
            Step::Outside => {
                menu.handle_outside_click();
            }
            Step::Wait(ms) => {
                clock.advance(Duration::from_millis(*ms));
                let fired = scheduler.run_due_timers();
                log::debug!("{fired} timer(s) fired");
            }
            Step::Key(key) => {
                let claimed = menu.handle_key(&KeyEvent::new(*key));
                log::debug!("{key:?} claimed={claimed}");
            }
        }
        scheduler.run_frame();
        println!(
            "{step:?}: menu {} | share {}",
            describe(&menu),
            describe(share.menu())
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let direction = if args.first().is_some_and(|a| a == "--rtl") {
        args.remove(0);
        TextDirection::Rtl
    } else {
        TextDirection::Ltr
    };
    if args.is_empty() {
        args = DEFAULT_SCRIPT.iter().map(|s| s.to_string()).collect();
    }
    let steps = args
        .iter()
        .map(|s| parse_step(s))
        .collect::<Result<Vec<_>>>()?;

    with_text_direction(direction, || run(&steps))
}
