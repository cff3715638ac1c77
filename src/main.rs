use std::path::PathBuf;

use clap::{App, Arg, ArgMatches};
use log::{debug, error, info, LevelFilter};

use sdl_lessons::config::{LessonsConfig, DEFAULT_CONFIG_PATH};
use sdl_lessons::display::{Display, PixelBuffer, RenderTarget};
use sdl_lessons::input::{InputEvent, Key};
use sdl_lessons::lessons::{self, Lesson, LessonContext, LESSONS};
use sdl_lessons::util::FpsCounter;

/// Frames between frame rate reports at debug level
const FPS_REPORT_INTERVAL: u64 = 300;

fn cli() -> App<'static, 'static> {
    App::new("sdl-lessons")
        .version(env!("CARGO_PKG_VERSION"))
        .about("SDL2 tutorial lessons. Keys 1-9 and 0 switch lessons, Escape quits.")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("PATH")
                .help("Settings file (default: lessons.json if present)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("lesson")
                .short("l")
                .long("lesson")
                .value_name("N")
                .help("Lesson to start with (1-10)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("width")
                .long("width")
                .help("Window width")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("height")
                .long("height")
                .help("Window height")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("no_vsync")
                .long("no-vsync")
                .help("Disable VSync for an uncapped frame rate"),
        )
        .arg(
            Arg::with_name("assets")
                .short("a")
                .long("assets")
                .value_name("DIR")
                .help("Directory the lesson images are loaded from")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Log at debug level"),
        )
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    // RUST_LOG still wins over the flag
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn parse_number<T: std::str::FromStr>(
    matches: &ArgMatches,
    name: &str,
) -> Result<Option<T>, String> {
    matches
        .value_of(name)
        .map(|v| v.parse().map_err(|_| format!("--{name} expects a number, got '{v}'")))
        .transpose()
}

/// Settings file plus command line overrides
fn load_config(matches: &ArgMatches) -> Result<LessonsConfig, String> {
    let mut config = match matches.value_of("config") {
        Some(path) => LessonsConfig::load(path),
        None => LessonsConfig::load_or_default(DEFAULT_CONFIG_PATH),
    }
    .map_err(|e| e.to_string())?;

    if let Some(width) = parse_number(matches, "width")? {
        config.width = width;
    }
    if let Some(height) = parse_number(matches, "height")? {
        config.height = height;
    }
    if let Some(lesson) = parse_number::<usize>(matches, "lesson")? {
        if !(1..=LESSONS.len()).contains(&lesson) {
            return Err(format!("--lesson must be between 1 and {}", LESSONS.len()));
        }
        config.start_lesson = lesson - 1;
    }
    if matches.is_present("no_vsync") {
        config.vsync = false;
    }
    if let Some(dir) = matches.value_of("assets") {
        config.asset_dir = PathBuf::from(dir);
    }
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

/// Build lesson `index` and show its name in the title bar
fn open_lesson(
    display: &mut Display,
    index: usize,
    ctx: &LessonContext,
) -> Result<Box<dyn Lesson>, String> {
    let lesson = lessons::build(index, ctx).map_err(|e| e.to_string())?;
    display.set_title(&format!("SDL Lessons - {}", lesson.name()))?;
    Ok(lesson)
}

fn main() -> Result<(), String> {
    let matches = cli().get_matches();
    init_logging(matches.is_present("verbose"));

    let config = load_config(&matches)?;
    let ctx = LessonContext::from_config(&config);
    info!(
        "{}x{}, vsync {}, assets in {}",
        config.width,
        config.height,
        if config.vsync { "on" } else { "off" },
        config.asset_dir.display()
    );

    let (mut display, texture_creator) =
        Display::with_options("SDL Lessons", config.width, config.height, config.vsync)?;
    let mut target = RenderTarget::with_size(&texture_creator, config.width, config.height)?;
    let mut buffer = PixelBuffer::with_size(config.width, config.height);

    let mut current = config.start_lesson;
    let mut lesson = open_lesson(&mut display, current, &ctx)?;
    let mut fps = FpsCounter::new(60);

    'main: loop {
        for event in display.poll_events() {
            if let InputEvent::KeyDown {
                key,
                repeat: false,
            } = event
            {
                if let Some(next) = key.lesson_index() {
                    if next != current {
                        // The old lesson joins its workers before the next one starts
                        drop(lesson);
                        lesson = match open_lesson(&mut display, next, &ctx) {
                            Ok(lesson) => {
                                current = next;
                                lesson
                            },
                            Err(e) => {
                                error!("Unable to start lesson {}: {e}", next + 1);
                                open_lesson(&mut display, current, &ctx)?
                            },
                        };
                    }
                    continue;
                }
            }

            match event {
                InputEvent::Quit
                | InputEvent::KeyDown {
                    key: Key::Escape, ..
                } => break 'main,
                other => lesson.handle_event(&other),
            }
        }

        lesson.update();
        lesson.render(&mut buffer);
        display.present(&mut target, &buffer)?;

        fps.tick();
        if fps.frames() % FPS_REPORT_INTERVAL == 0 {
            debug!(
                "{:.1} fps ({:.2} ms/frame)",
                fps.avg_fps(),
                fps.avg_frame_time_ms()
            );
        }
    }

    info!("Closing {}", lesson.name());
    Ok(())
}
