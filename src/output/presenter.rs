use std::io::{self, Write};

use super::config::{OutputConfig, OutputFormat};
use super::types::Envelope;

pub trait Presenter: Send + Sync {
    fn emit(&self, env: &Envelope, w: &mut dyn Write) -> io::Result<()>;
}

/// One envelope per line (or pretty-printed), for scripting.
pub struct JsonPresenter { pub pretty: bool }
impl Presenter for JsonPresenter {
    fn emit(&self, env: &Envelope, w: &mut dyn Write) -> io::Result<()> {
        if self.pretty { serde_json::to_writer_pretty(&mut *w, env).map_err(to_io)? } else { serde_json::to_writer(&mut *w, env).map_err(to_io)? }
        writeln!(w)
    }
}

/// Header line plus the payload, always pretty.
pub struct TextPresenter;
impl Presenter for TextPresenter {
    fn emit(&self, env: &Envelope, w: &mut dyn Write) -> io::Result<()> {
        let (label, body) = if env.apply { ("Result", &env.result) } else { ("Plan", &env.plan) };
        writeln!(w, "{}: {}", label, env.op)?;
        if let Some(body) = body {
            serde_json::to_writer_pretty(&mut *w, body).map_err(to_io)?;
            writeln!(w)?;
        }
        Ok(())
    }
}

pub struct Emitter {
    presenter: Box<dyn Presenter>,
}

impl Emitter {
    pub fn new(cfg: OutputConfig) -> Self {
        let presenter: Box<dyn Presenter> = match cfg.format {
            OutputFormat::Json => Box::new(JsonPresenter { pretty: cfg.pretty }),
            OutputFormat::Text => Box::new(TextPresenter),
        };
        Emitter { presenter }
    }

    pub fn emit(&self, env: &Envelope) -> io::Result<()> {
        let mut out = io::stdout().lock();
        self.presenter.emit(env, &mut out)?;
        out.flush()
    }
}

fn to_io(e: serde_json::Error) -> io::Error { io::Error::new(io::ErrorKind::Other, e) }

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(p: &dyn Presenter, env: &Envelope) -> String {
        let mut buf = Vec::new();
        p.emit(env, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn json_is_single_line() {
        let env = Envelope::result("search", &json!({"GitHub": {"status": "success"}}), None).unwrap();
        let out = render(&JsonPresenter { pretty: false }, &env);
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("\"op\":\"search\""));
    }

    #[test]
    fn text_shows_plan_header_and_body() {
        let env = Envelope::plan("tool", &json!({"action": "add"}), None).unwrap();
        let out = render(&TextPresenter, &env);
        assert!(out.starts_with("Plan: tool\n"));
        assert!(out.contains("\"action\": \"add\""));
    }
}
