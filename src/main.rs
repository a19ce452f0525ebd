mod commands;
mod render;

use commands::Command;
use medvida_core::layout;
use medvida_core::views::payment::PaymentMethod;
use medvida_core::{
    Intent, PageView, Session, SessionConfig, SessionHandle, SessionSnapshot, ViewHost,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Height of the terminal "viewport" used for the landing menu rule.
const VIEWPORT_HEIGHT: f64 = 800.0;

/// Main entry point for the MedVida terminal front end
///
/// Starts a navigation session and renders it as text. Each line read from stdin is a command
/// (`help` lists them); page transitions, the loader, carousel and checkout countdown are shown
/// as they happen. Logs go to stderr.
///
/// # Environment Variables
/// - `MEDVIDA_DRAW_MS`, `MEDVIDA_SETTLE_MS`, `MEDVIDA_FADE_MS`, `MEDVIDA_STARTUP_MS`: cover timings
/// - `MEDVIDA_HOLD_SECS`: checkout reservation hold (default: 600)
/// - `MEDVIDA_CAROUSEL_MS`: landing carousel period (default: 4000)
/// - `MEDVIDA_CATALOG_PATH`: catalog YAML file (default: built-in catalog)
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("medvida=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let today = chrono::Local::now().date_naive();
    let config = SessionConfig::from_lookup(|key| std::env::var(key).ok(), today)?;
    let catalog = Arc::new(config.load_catalog()?);
    tracing::info!(
        doctors = catalog.doctors().len(),
        custom = config.catalog_path().is_some(),
        "catalog loaded"
    );

    let (handle, task) = Session::spawn(config.timings());
    let mut app = App {
        handle: handle.clone(),
        host: ViewHost::new(catalog, config.view_settings()),
        scroll_y: 0.0,
        last: None,
    };
    println!("{}", commands::HELP);

    let mut snapshots = handle.subscribe();
    let mut notices = handle.notices();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    app.on_snapshot(snapshots.borrow_and_update().clone());

    loop {
        let loader_change = app.last.as_ref().and_then(render::next_loader_change);
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match commands::parse(&line) {
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(command)) => {
                        if let Err(e) = app.apply(command) {
                            println!("! {e}");
                        }
                    }
                    Ok(None) => {}
                    Err(e) => println!("! {e}"),
                }
            }
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                app.on_snapshot(snapshot);
            }
            notice = notices.recv() => match notice {
                Ok(notice) => println!("✔ {notice}"),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "notices dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            _ = view_tick(&mut app.host) => app.on_tick(),
            _ = sleep_until(loader_change), if loader_change.is_some() => app.redraw_cover(),
        }
    }

    drop(app);
    drop(handle);
    task.await?;
    Ok(())
}

async fn sleep_until(at: Option<tokio::time::Instant>) {
    match at {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}

/// Resolves when the mounted view's own timer fires. Never resolves for views without one.
async fn view_tick(host: &mut ViewHost) {
    let ticked = match host.view_mut() {
        Some(PageView::Landing(view)) => view.carousel_mut().advanced().await,
        Some(PageView::Checkout(view)) => view.countdown_mut().tick().await,
        _ => false,
    };
    if !ticked {
        std::future::pending::<()>().await;
    }
}

struct App {
    handle: SessionHandle,
    host: ViewHost,
    scroll_y: f64,
    last: Option<SessionSnapshot>,
}

impl App {
    fn on_snapshot(&mut self, snapshot: SessionSnapshot) {
        let cover_changed = self.last.as_ref().is_none_or(|last| last.cover != snapshot.cover);
        if cover_changed {
            if let Some(line) = render::cover(&snapshot, tokio::time::Instant::now()) {
                println!("{line}");
            }
        }

        let remounted = self.host.sync(&snapshot);
        let uncovered = cover_changed && snapshot.is_settled();
        self.last = Some(snapshot);
        if remounted || uncovered {
            self.draw();
        }
    }

    fn redraw_cover(&self) {
        if let Some(line) = self
            .last
            .as_ref()
            .and_then(|s| render::cover(s, tokio::time::Instant::now()))
        {
            println!("{line}");
        }
    }

    fn on_tick(&self) {
        if !self.is_settled() {
            return;
        }
        if let Some(line) = self.host.view().and_then(render::live_line) {
            println!("{line}");
        }
    }

    fn is_settled(&self) -> bool {
        self.last.as_ref().is_some_and(SessionSnapshot::is_settled)
    }

    fn draw(&self) {
        let Some(view) = self.host.view() else {
            return;
        };
        if !self.is_settled() {
            return;
        }
        println!();
        if let Some(menu) = render::menu(view.page(), self.scroll_y, VIEWPORT_HEIGHT) {
            println!("{menu}");
        }
        print!("{}", render::page(view));
        if let Some(line) = render::live_line(view) {
            println!("{line}");
        }
    }

    fn dispatch(&mut self, intent: Intent) -> anyhow::Result<()> {
        self.scroll_y = 0.0;
        self.handle.dispatch(intent)?;
        Ok(())
    }

    fn apply(&mut self, command: Command) -> anyhow::Result<()> {
        if command == Command::Help {
            println!("{}", commands::HELP);
            return Ok(());
        }
        let Some(view) = self.host.view_mut() else {
            anyhow::bail!("still loading");
        };

        let outcome = match (command, view) {
            (Command::Go(page), _) => Outcome::Dispatch(Intent::Navigate(page)),
            (Command::Home, _) => Outcome::Dispatch(layout::home()),
            (Command::Scroll(y), view) => {
                let page = view.page();
                let was_visible = render::menu(page, self.scroll_y, VIEWPORT_HEIGHT).is_some();
                self.scroll_y = y.max(0.0);
                match render::menu(page, self.scroll_y, VIEWPORT_HEIGHT) {
                    Some(menu) if !was_visible => println!("{menu}"),
                    _ => {}
                }
                Outcome::Nothing
            }
            (Command::BookNow, PageView::Landing(v)) => Outcome::Dispatch(v.book_now()),
            (Command::BookNow, PageView::Plans(v)) => Outcome::Dispatch(v.subscribe()),
            (Command::SeePlans, PageView::Landing(v)) => Outcome::Dispatch(v.see_plans()),
            (Command::HowItWorks, PageView::Landing(v)) => {
                v.toggle_how_it_works();
                Outcome::Redraw
            }
            (Command::Specialty(s), PageView::Specialties(v)) => Outcome::Dispatch(v.select(s)?),
            (Command::Profile(id), PageView::DoctorSelection(v)) => {
                Outcome::Dispatch(v.view_profile(&id)?)
            }
            (Command::Book(id), PageView::DoctorSelection(v)) => {
                Outcome::Dispatch(v.book_direct(&id)?)
            }
            (Command::Day(day), PageView::DoctorProfile(v)) => {
                v.choose_day(day)?;
                Outcome::Redraw
            }
            (Command::Slot(slot), PageView::DoctorProfile(v)) => {
                v.choose_slot(&slot)?;
                Outcome::Redraw
            }
            (Command::Confirm, PageView::DoctorProfile(v)) => match v.confirm() {
                Some(intent) => Outcome::Dispatch(intent),
                None => anyhow::bail!("choose a time slot first"),
            },
            (Command::Pix, PageView::Checkout(v)) => {
                v.set_payment_method(PaymentMethod::Pix);
                Outcome::Redraw
            }
            (Command::Card(number), PageView::Checkout(v)) => {
                v.set_payment_method(PaymentMethod::Card);
                v.enter_card_number(&number);
                Outcome::Redraw
            }
            (Command::Confirm, PageView::Checkout(v)) => Outcome::Dispatch(v.confirm()),
            (command, view) => {
                anyhow::bail!("{command:?} is not available on {}", view.page())
            }
        };

        match outcome {
            Outcome::Dispatch(intent) => self.dispatch(intent)?,
            Outcome::Redraw => self.draw(),
            Outcome::Nothing => {}
        }
        Ok(())
    }
}

enum Outcome {
    Dispatch(Intent),
    Redraw,
    Nothing,
}
