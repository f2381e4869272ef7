// src/utils/logger.rs
//
// `log` backend that writes into the status console.

use gtk4::prelude::*;
use gtk4::{glib, TextView};
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use std::sync::OnceLock;

static LOG_VIEW: OnceLock<glib::SendWeakRef<TextView>> = OnceLock::new();
static LOGGER: GtkLogger = GtkLogger;

/// Oldest lines are dropped past this.
const MAX_LINES: i32 = 400;

/// (tag name, foreground, bold)
const TAGS: [(&str, &str, bool); 4] = [
  ("error", "#ff6b6b", true),
  ("warn", "#ffbb33", false),
  ("info", "#9ecbff", false),
  ("debug", "#7f8c99", false),
];

struct GtkLogger;

/// Console tag and short prefix for a level.
pub fn level_style(level: Level) -> (&'static str, &'static str) {
  match level {
    Level::Error => ("error", "ERR "),
    Level::Warn => ("warn", "WARN"),
    Level::Info => ("info", "INFO"),
    Level::Debug | Level::Trace => ("debug", "DBG "),
  }
}

pub fn format_line(level: Level, target: &str, msg: &str) -> String {
  let (_, prefix) = level_style(level);
  // Only the last path segment: "thetaview::io::manifest" -> "manifest"
  let module = target.rsplit("::").next().unwrap_or(target);
  format!("{} {:<10} {}\n", prefix, module, msg)
}

pub fn init(view: &TextView) -> Result<(), SetLoggerError> {
  let buffer = view.buffer();
  let tag_table = buffer.tag_table();

  for (name, color, bold) in TAGS {
    if tag_table.lookup(name).is_none() {
      let tag = gtk4::TextTag::new(Some(name));
      tag.set_property("foreground", color);
      if bold {
        tag.set_property("weight", 700);
      }
      tag_table.add(&tag);
    }
  }

  let _ = LOG_VIEW.set(view.downgrade().into());
  log::set_logger(&LOGGER).map(|()| log::set_max_level(LevelFilter::Debug))
}

fn append(view: &TextView, line: &str, tag: &str) {
  let buffer = view.buffer();
  let mut end = buffer.end_iter();
  buffer.insert_with_tags_by_name(&mut end, line, &[tag]);

  let excess = buffer.line_count() - MAX_LINES;
  if excess > 0 {
    let mut start = buffer.start_iter();
    if let Some(mut cut) = buffer.iter_at_line(excess) {
      buffer.delete(&mut start, &mut cut);
    }
  }

  // Auto-scroll
  let mark = buffer.create_mark(None, &buffer.end_iter(), false);
  view.scroll_to_mark(&mark, 0.0, true, 0.0, 1.0);
  buffer.delete_mark(&mark);
}

impl log::Log for GtkLogger {
  fn enabled(&self, metadata: &Metadata) -> bool {
    metadata.level() <= Level::Debug
  }

  fn log(&self, record: &Record) {
    if !self.enabled(record.metadata()) {
      return;
    }
    let (tag, _) = level_style(record.level());
    let line = format_line(record.level(), record.target(), &record.args().to_string());

    // Problems also go to stderr, in case the console is not up yet
    if record.level() <= Level::Warn {
      eprint!("{}", line);
    }

    glib::MainContext::default().spawn_local(async move {
      if let Some(view) = LOG_VIEW.get().and_then(|w| w.upgrade()) {
        append(&view, &line, tag);
      }
    });
  }

  fn flush(&self) {}
}
