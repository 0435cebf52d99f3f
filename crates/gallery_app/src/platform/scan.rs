//! Headless driver: runs one gallery session to completion and prints the
//! image URLs it reveals, one per line, on stdout.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use gallery_core::{update, AppState, ImageExtension, Msg, Phase, SessionMode};
use gallery_engine::FetchSettings;
use gallery_logging::gallery_debug;

use super::config::ScanArgs;
use super::effects::EffectRunner;

const RESPONSE_MARGIN: Duration = Duration::from_secs(5);

pub fn run(args: &ScanArgs, settings: FetchSettings) -> Result<()> {
    let filters = parse_extensions(&args.only)?;
    let wait = settings.request_timeout + RESPONSE_MARGIN;
    let runner = EffectRunner::new(settings).context("Failed to start extraction engine")?;

    let mode = if args.remote {
        SessionMode::RemotePage
    } else {
        SessionMode::LocalWindow {
            window_size: args.window.max(1),
        }
    };
    let mut state = AppState::new(mode);

    if !filters.is_empty() {
        for extension in ImageExtension::ALL {
            let included = filters.contains(&extension);
            state = dispatch(state, Msg::FilterToggled { extension, included }, &runner);
        }
    }
    state = dispatch(state, Msg::InputChanged(args.url.clone()), &runner);
    state = dispatch(state, Msg::UrlSubmitted, &runner);

    let mut printed = 0;
    let mut rounds = 0;
    loop {
        while state.session().is_loading() {
            let Some(msg) = runner.next_msg(wait) else {
                bail!("Timed out waiting for {}", args.url);
            };
            state = dispatch(state, msg, &runner);
        }

        let view = state.view();
        for url in view.images.iter().skip(printed) {
            println!("{url}");
        }
        printed = view.images.len();

        if view.phase == Phase::Failed || rounds >= args.max_rounds || !state.session().can_grow() {
            break;
        }
        gallery_debug!("Growing gallery, round {}", rounds + 1);
        state = dispatch(state, Msg::SentinelRendered(view.sentinel), &runner);
        state = dispatch(state, Msg::SentinelVisible, &runner);
        rounds += 1;
    }

    let view = state.view();
    eprintln!("{}", view.status_line());
    match view.error {
        Some(error) if view.phase == Phase::Failed => bail!(error),
        _ => Ok(()),
    }
}

fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner) -> AppState {
    let (state, effects) = update(state, msg);
    runner.enqueue(effects);
    state
}

fn parse_extensions(raw: &[String]) -> Result<Vec<ImageExtension>> {
    raw.iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(|value| {
            ImageExtension::from_suffix(value.trim_start_matches('.'))
                .with_context(|| format!("Unknown image extension: {value}"))
        })
        .collect()
}
