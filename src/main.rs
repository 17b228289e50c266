// SPDX-License-Identifier: MIT
//
// moodbloom — the adaptive mood color engine from the command line.
//
// This binary is a renderer: it wires the engine crates to a terminal.
//
//   mb-color  → color spaces, HSL tokens, APCA
//   mb-engine → mood table, text search, accents, burst/blend animation
//
// Every subcommand follows the same path:
//
//   --config → EngineConfig → token source → token cache
//   cache → engine operation → table / JSON / half-block painting
//
// Logging goes to stderr, filtered by MOODBLOOM_LOG (default "warn").

mod ansi;
mod paint;
mod terminal;

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use mb_color::color::{Hsl, Rgb};
use mb_color::token::{hsl_token, parse_hsl_token, try_parse_hsl_token};
use mb_engine::accent::derive_accent;
use mb_engine::blend::blend_frame;
use mb_engine::burst::{GradientStop, burst_stops};
use mb_engine::cache::{ResolvedMoodColors, TokenCache};
use mb_engine::config::{EngineConfig, TextConfig};
use mb_engine::contrast::{AccentOptions, ContrastResult, Polarity, Prefer, pick_accent_text, pick_neutral_text};
use mb_engine::mood::{Mood, MoodPalette};
use mb_engine::source::{StaticTokenSource, TokenSource};
use serde_json::json;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::terminal::Size;

// ─── Command Line ───────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name = "moodbloom",
    about = "Adaptive mood color engine: legible text, accents and burst transitions",
    version
)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List every mood with its colors, accent and text color.
    Moods,

    /// Render the radial burst from one mood to another.
    Burst(BurstArgs),

    /// Find text colors that read against a set of backgrounds.
    Text(TextArgs),

    /// Derive the accent color of two tokens.
    Accent(AccentArgs),

    /// Print the frames of a token blend.
    Blend(BlendArgs),
}

#[derive(Debug, Args)]
struct BurstArgs {
    #[arg(long, value_parser = mood_arg)]
    from: Mood,
    #[arg(long, value_parser = mood_arg)]
    to: Mood,
    /// Animation progress in [0, 1].
    #[arg(long, default_value_t = 0.5)]
    progress: f64,
    /// Burst origin as `X,Y` in viewport percent (default from config).
    #[arg(long, value_parser = origin_arg)]
    origin: Option<(f64, f64)>,
    /// Print the stop list as JSON.
    #[arg(long, conflicts_with = "animate")]
    json: bool,
    /// Play the whole transition in place.
    #[arg(long)]
    animate: bool,
    /// Canvas size as `COLSxROWS` (default: the terminal).
    #[arg(long)]
    size: Option<Size>,
}

#[derive(Debug, Args)]
struct TextArgs {
    /// Background: an `"H S% L%"` token or a mood name (both its colors).
    #[arg(long = "bg", required = true, num_args = 1..)]
    backgrounds: Vec<String>,
    /// APCA floor, Lc (default from config).
    #[arg(long)]
    target: Option<f64>,
    /// Also search for hued text at this hue.
    #[arg(long)]
    hue: Option<f64>,
    /// Saturation of hued text, percent (default from config).
    #[arg(long)]
    saturation: Option<f64>,
    #[arg(long, value_enum)]
    prefer: Option<PreferArg>,
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct AccentArgs {
    /// First color, `"H S% L%"`.
    first: String,
    /// Second color, `"H S% L%"`.
    second: String,
}

#[derive(Debug, Args)]
struct BlendArgs {
    #[arg(long, value_parser = mood_arg)]
    from: Mood,
    #[arg(long, value_parser = mood_arg)]
    to: Mood,
    /// Number of steps between the first and last frame.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    frames: u32,
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PreferArg {
    Subtle,
    Aggressive,
}

impl From<PreferArg> for Prefer {
    fn from(arg: PreferArg) -> Self {
        match arg {
            PreferArg::Subtle => Self::Subtle,
            PreferArg::Aggressive => Self::Aggressive,
        }
    }
}

fn mood_arg(s: &str) -> Result<Mood, mb_engine::Error> {
    s.parse()
}

fn origin_arg(s: &str) -> Result<(f64, f64), String> {
    let (x, y) = s.split_once(',').ok_or_else(|| format!("{s:?} is not X,Y"))?;
    let coord = |v: &str| match v.trim().parse::<f64>() {
        Ok(n) if (0.0..=100.0).contains(&n) => Ok(n),
        _ => Err(format!("{v:?} is not a percentage in [0, 100]")),
    };
    Ok((coord(x)?, coord(y)?))
}

fn token_arg(s: &str) -> Result<Hsl> {
    try_parse_hsl_token(s).with_context(|| format!("{s:?} is not an \"H S% L%\" token"))
}

// ─── Session ────────────────────────────────────────────────────────────────

/// Configuration plus the token source and cache built from it.
struct Session {
    config: EngineConfig,
    source: StaticTokenSource,
    cache: TokenCache,
}

impl Session {
    fn new(config: EngineConfig) -> Self {
        let source = config.token_source();
        let cache = TokenCache::new();
        cache.populate(&source);
        Self { config, source, cache }
    }

    fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => EngineConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
            None => EngineConfig::default(),
        };
        Ok(Self::new(config))
    }

    fn palette(&self, mood: Mood) -> MoodPalette {
        self.source.resolve(mood).unwrap_or_else(|| mood.palette())
    }

    fn colors(&self, mood: Mood) -> ResolvedMoodColors {
        self.cache
            .get(mood)
            .unwrap_or_else(|| ResolvedMoodColors::from_palette(mood, &self.palette(mood)))
    }
}

// ─── Subcommands ────────────────────────────────────────────────────────────

fn run(cli: Cli) -> Result<()> {
    let session = Session::load(cli.config.as_deref())?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.command {
        Commands::Moods => run_moods(&session, &mut out)?,
        Commands::Burst(args) => run_burst(&session, &args, &mut out)?,
        Commands::Text(args) => run_text(&session, &args, &mut out)?,
        Commands::Accent(args) => run_accent(&args, &mut out)?,
        Commands::Blend(args) => run_blend(&session, &args, &mut out)?,
    }
    out.flush()?;
    Ok(())
}

fn run_moods(session: &Session, out: &mut impl Write) -> Result<()> {
    let target = session.config.text.target_lc;
    writeln!(
        out,
        "{:<10} {:<9} {:<13} {:<13} {:<6} {:<13} text",
        "mood", "kind", "primary", "secondary", "", "accent"
    )?;

    for mood in Mood::ALL {
        let colors = session.colors(mood);
        let resolved = colors.palette();
        let [primary, secondary, _] = &colors.tokens;
        let (p, s) = (resolved.primary.to_rgb(), resolved.secondary.to_rgb());

        let accent = derive_accent(parse_hsl_token(primary), parse_hsl_token(secondary));
        let text = pick_neutral_text(&[p, s], target);

        write!(out, "{:<10} {:<9} {primary:<13} {secondary:<13} ", mood.name(), mood.kind().to_string())?;
        paint::swatch(out, p, 3)?;
        paint::swatch(out, s, 3)?;
        write!(out, " {:<13} ", hsl_token(accent))?;
        paint::swatch(out, accent.to_rgb(), 2)?;
        write!(out, " ")?;
        paint::sample(out, text.rgb, p, "Aa")?;
        paint::sample(out, text.rgb, s, "Aa")?;
        writeln!(out, " Lc {:.1}", text.lc)?;
    }
    Ok(())
}

fn run_burst(session: &Session, args: &BurstArgs, out: &mut impl Write) -> Result<()> {
    let burst = session.config.burst;
    let origin = args.origin.unwrap_or((burst.origin_x, burst.origin_y));
    let from = session.colors(args.from).palette();
    let to = session.colors(args.to).palette();
    let frame = |progress: f64| burst_stops(&from, &to, progress, origin.0, origin.1);

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &frame(args.progress))?;
        writeln!(out)?;
        return Ok(());
    }

    let screen = terminal::get_size().unwrap_or(Size::FALLBACK);
    if args.animate {
        let size = args.size.unwrap_or(Size {
            cols: screen.cols,
            rows: screen.rows.saturating_sub(1).max(1),
        });
        return animate(out, &frame, origin, size, burst.duration_ms, burst.fps);
    }

    let stops = frame(args.progress);
    print_stops(out, &stops)?;
    writeln!(out)?;
    let size = args.size.unwrap_or(Size {
        cols: screen.cols,
        rows: (screen.rows / 2).max(1),
    });
    paint::radial(out, &stops, origin, size)?;
    Ok(())
}

fn print_stops(out: &mut impl Write, stops: &[GradientStop]) -> io::Result<()> {
    for stop in stops {
        write!(out, "{:>6.1}%  {:<20} ", stop.position, stop.color.to_string())?;
        paint::swatch(out, stop.color, 4)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Restores the cursor even when a frame fails to write.
struct CursorGuard;

impl Drop for CursorGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = ansi::reset(&mut stdout);
        let _ = ansi::cursor_show(&mut stdout);
        let _ = stdout.flush();
    }
}

fn animate(
    out: &mut impl Write,
    frame: &impl Fn(f64) -> Vec<GradientStop>,
    origin: (f64, f64),
    size: Size,
    duration_ms: f64,
    fps: u32,
) -> Result<()> {
    if !terminal::is_tty() {
        bail!("--animate needs a terminal on stdout");
    }

    let interval = Duration::from_secs_f64(1.0 / f64::from(fps.max(1)));
    let total = Duration::from_secs_f64(duration_ms.max(0.0) / 1000.0);
    debug!(?size, fps, ?total, "animating burst");

    let _guard = CursorGuard;
    ansi::cursor_hide(out)?;
    ansi::clear_screen(out)?;

    let start = Instant::now();
    loop {
        let elapsed = start.elapsed();
        let progress = if total.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / total.as_secs_f64()).min(1.0)
        };

        ansi::begin_sync(out)?;
        ansi::cursor_to(out, 0, 0)?;
        paint::radial(out, &frame(progress), origin, size)?;
        ansi::end_sync(out)?;
        out.flush()?;

        if progress >= 1.0 {
            break;
        }
        if let Some(rest) = interval.checked_sub(start.elapsed().saturating_sub(elapsed)) {
            thread::sleep(rest);
        }
    }
    Ok(())
}

fn run_text(session: &Session, args: &TextArgs, out: &mut impl Write) -> Result<()> {
    let mut backgrounds = Vec::new();
    for bg in &args.backgrounds {
        if let Ok(mood) = bg.parse::<Mood>() {
            let resolved = session.colors(mood).palette();
            backgrounds.extend([resolved.primary.to_rgb(), resolved.secondary.to_rgb()]);
        } else {
            backgrounds.push(token_arg(bg)?.to_rgb());
        }
    }

    let text = session.config.text;
    let target = args.target.unwrap_or(text.target_lc);
    let options = accent_options(&text, args);

    let neutral = pick_neutral_text(&backgrounds, target);
    let accent = args
        .hue
        .map(|hue| pick_accent_text(&backgrounds, target, hue, options));

    if args.json {
        let report = json!({ "target_lc": target, "neutral": neutral, "accent": accent });
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    print_result(out, "neutral", &neutral, target, &backgrounds)?;
    if let Some(accent) = &accent {
        print_result(out, "accent", accent, target, &backgrounds)?;
    }
    Ok(())
}

/// Configured accent options with the command-line flags laid over them.
fn accent_options(text: &TextConfig, args: &TextArgs) -> AccentOptions {
    let mut options = text.accent_options();
    if let Some(saturation) = args.saturation {
        options.saturation = saturation;
    }
    if let Some(prefer) = args.prefer {
        options.prefer = prefer.into();
    }
    options
}

fn print_result(
    out: &mut impl Write,
    label: &str,
    result: &ContrastResult,
    target: f64,
    backgrounds: &[Rgb],
) -> io::Result<()> {
    let polarity = match result.polarity {
        Polarity::Light => "light",
        Polarity::Dark => "dark",
    };
    let verdict = if result.meets(target) { "meets" } else { "best effort" };
    write!(
        out,
        "{label:<8} {:<20} {polarity:<5} Lc {:>5.1} ({verdict})  ",
        result.rgb.to_string(),
        result.lc
    )?;
    for &bg in backgrounds {
        paint::sample(out, result.rgb, bg, "Aa")?;
    }
    writeln!(out)
}

fn run_accent(args: &AccentArgs, out: &mut impl Write) -> Result<()> {
    let accent = derive_accent(token_arg(&args.first)?, token_arg(&args.second)?);
    write!(out, "{}  ", hsl_token(accent))?;
    paint::swatch(out, accent.to_rgb(), 4)?;
    writeln!(out)?;
    Ok(())
}

fn run_blend(session: &Session, args: &BlendArgs, out: &mut impl Write) -> Result<()> {
    let from = session.palette(args.from);
    let to = session.palette(args.to);
    let duration = session.config.blend.duration_ms;
    let frames: Vec<_> = (0..=args.frames)
        .map(|i| {
            let elapsed = duration * f64::from(i) / f64::from(args.frames);
            (elapsed, blend_frame(&from, &to, elapsed, duration))
        })
        .collect();

    if args.json {
        let report: Vec<_> = frames
            .iter()
            .map(|(elapsed, frame)| json!({ "elapsed_ms": elapsed, "frame": frame }))
            .collect();
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    for (elapsed, frame) in &frames {
        write!(
            out,
            "{elapsed:>7.1}ms  {:>6.1}°  {:>5.1}% {:>5.1}%  ",
            frame.angle_deg, frame.stop_mid, frame.stop_end
        )?;
        for color in [frame.m1, frame.m2, frame.m3] {
            paint::swatch(out, color, 3)?;
        }
        writeln!(out, "{}", if frame.finished { "  done" } else { "" })?;
    }
    Ok(())
}

// ─── Entry Point ────────────────────────────────────────────────────────────

fn init_logging() {
    let filter = EnvFilter::try_from_env("MOODBLOOM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("moodbloom: {e:#}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    fn session() -> Session {
        Session::new(EngineConfig::default())
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    // ── Arguments ───────────────────────────────────────────────────────

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_burst_arguments() {
        let cli = Cli::try_parse_from([
            "moodbloom", "--config", "mb.toml", "burst", "--from", "Happy", "--to", "calm", "--origin", "20,80",
            "--size", "40x10",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("mb.toml")));
        let Commands::Burst(args) = cli.command else {
            panic!("expected burst");
        };
        assert_eq!(args.from, Mood::Happy);
        assert_eq!(args.to, Mood::Calm);
        assert_eq!(args.origin, Some((20.0, 80.0)));
        assert_eq!(args.size, Some(Size { cols: 40, rows: 10 }));
        assert!((args.progress - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_unknown_moods_and_bad_origins() {
        assert!(Cli::try_parse_from(["moodbloom", "burst", "--from", "grumpy", "--to", "calm"]).is_err());
        assert!(
            Cli::try_parse_from(["moodbloom", "burst", "--from", "happy", "--to", "calm", "--origin", "120,5"])
                .is_err()
        );
        assert!(
            Cli::try_parse_from(["moodbloom", "burst", "--from", "happy", "--to", "calm", "--json", "--animate"])
                .is_err()
        );
    }

    #[test]
    fn text_takes_several_backgrounds() {
        let cli = Cli::try_parse_from([
            "moodbloom", "text", "--bg", "0 0% 100%", "calm", "--prefer", "aggressive", "--hue", "220",
        ])
        .unwrap();
        let Commands::Text(args) = cli.command else {
            panic!("expected text");
        };
        assert_eq!(args.backgrounds, ["0 0% 100%", "calm"]);
        assert_eq!(args.prefer, Some(PreferArg::Aggressive));
        assert_eq!(args.hue, Some(220.0));
    }

    // ── Output ──────────────────────────────────────────────────────────

    #[test]
    fn burst_json_is_a_stop_list() {
        let args = BurstArgs {
            from: Mood::Happy,
            to: Mood::Calm,
            progress: 1.0,
            origin: None,
            json: true,
            animate: false,
            size: None,
        };
        let out = render(|w| run_burst(&session(), &args, w));
        let stops: serde_json::Value = serde_json::from_str(&out).unwrap();
        let stops = stops.as_array().unwrap();
        assert_eq!(stops.len(), 4);
        assert_eq!(stops[0]["position"], 0.0);
        assert_eq!(stops[0]["color"], "rgb(37, 164, 228)");
        assert_eq!(stops[3]["position"], 100.0);
    }

    #[test]
    fn accent_flags_override_configured_options() {
        let config = EngineConfig::from_toml_str("[text]\naccent_saturation = 30.0\nprefer = \"aggressive\"\n").unwrap();
        let mut args = TextArgs {
            backgrounds: vec!["calm".into()],
            target: None,
            hue: Some(200.0),
            saturation: None,
            prefer: None,
            json: false,
        };
        let options = accent_options(&config.text, &args);
        assert_eq!(options, AccentOptions { saturation: 30.0, prefer: Prefer::Aggressive });

        args.saturation = Some(5.0);
        args.prefer = Some(PreferArg::Subtle);
        let options = accent_options(&config.text, &args);
        assert_eq!(options, AccentOptions { saturation: 5.0, prefer: Prefer::Subtle });
    }

    #[test]
    fn text_json_reports_dark_on_white() {
        let args = TextArgs {
            backgrounds: vec!["0 0% 100%".into()],
            target: Some(60.0),
            hue: None,
            saturation: None,
            prefer: None,
            json: true,
        };
        let out = render(|w| run_text(&session(), &args, w));
        let report: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(report["neutral"]["polarity"], "dark");
        assert!(report["neutral"]["lc"].as_f64().unwrap() >= 60.0);
        assert!(report["accent"].is_null());
    }

    #[test]
    fn text_rejects_malformed_backgrounds() {
        let args = TextArgs {
            backgrounds: vec!["teal".into()],
            target: None,
            hue: None,
            saturation: None,
            prefer: None,
            json: false,
        };
        let mut buf = Vec::new();
        let err = run_text(&session(), &args, &mut buf).unwrap_err();
        assert!(err.to_string().contains("teal"), "{err}");
    }

    #[test]
    fn accent_prints_a_token() {
        let args = AccentArgs {
            first: "350 80% 50%".into(),
            second: "10 80% 50%".into(),
        };
        let out = render(|w| run_accent(&args, w));
        let token = out.split("  ").next().unwrap();
        assert!(try_parse_hsl_token(token).is_some(), "{out:?}");
    }

    #[test]
    fn blend_json_ends_finished() {
        let args = BlendArgs {
            from: Mood::Calm,
            to: Mood::Angry,
            frames: 4,
            json: true,
        };
        let out = render(|w| run_blend(&session(), &args, w));
        let frames: serde_json::Value = serde_json::from_str(&out).unwrap();
        let frames = frames.as_array().unwrap();
        assert_eq!(frames.len(), 5);
        assert_eq!(frames[0]["frame"]["finished"], false);
        assert_eq!(frames[4]["frame"]["finished"], true);
    }

    #[test]
    fn moods_table_lists_every_mood() {
        let out = render(|w| run_moods(&session(), w));
        for mood in Mood::ALL {
            assert!(out.contains(mood.name()), "{mood} missing");
        }
        assert_eq!(out.lines().count(), Mood::ALL.len() + 1);
    }

    #[test]
    fn config_overrides_reach_the_cache() {
        let config = EngineConfig::from_toml_str("[moods.calm]\nprimary = \"0 0% 0%\"\nsecondary = \"0 0% 0%\"\n").unwrap();
        let session = Session::new(config);
        assert_eq!(session.colors(Mood::Calm).palette().primary.to_rgb(), Rgb::BLACK);
    }
}
