//! Line-oriented netlist parser.

pub mod types;

use std::path::Path;

use ynet_core::units::parse_value;
use ynet_core::{Component, ComponentKind, ComponentValue, NodeId};
use ynet_devices::HybridPiModel;

use crate::error::{Error, Result};
use types::{AcSweep, AcSweepType, ParseResult};

/// Parse netlist text.
pub fn parse(input: &str) -> Result<ParseResult> {
    let mut parser = Parser::default();
    for (index, raw) in input.lines().enumerate() {
        if !parser.parse_line(index + 1, raw)? {
            break;
        }
    }
    log::debug!(
        "parsed {} components (order {}), {} models",
        parser.result.table.len(),
        parser.result.table.order(),
        parser.result.models.len()
    );
    Ok(parser.result)
}

/// Read and parse a netlist file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<ParseResult> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text)
}

#[derive(Default)]
struct Parser {
    result: ParseResult,
}

impl Parser {
    /// Parse one line. Returns `false` once `.END` is reached.
    fn parse_line(&mut self, line: usize, raw: &str) -> Result<bool> {
        // Inline comments start with ';'.
        let text = raw.split(';').next().unwrap_or("").trim();
        if text.is_empty() || text.starts_with('*') {
            return Ok(true);
        }

        if let Some(directive) = text.strip_prefix('.') {
            return self.parse_directive(line, raw, directive);
        }

        self.parse_component(line, raw, text)?;
        Ok(true)
    }

    /// Parse `<identifier> <node>... <value>`.
    fn parse_component(&mut self, line: usize, raw: &str, text: &str) -> Result<()> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let name = tokens[0];
        let kind = ComponentKind::classify(name);

        if tokens.len() < 2 {
            return Err(Error::at(line, raw, format!("{name} has no value")));
        }
        let node_tokens = &tokens[1..tokens.len() - 1];

        if let Some(expected) = kind.node_count() {
            if node_tokens.len() != expected {
                return Err(Error::at(
                    line,
                    raw,
                    format!(
                        "{kind} {name} expects {expected} nodes and a value, found {} tokens",
                        tokens.len() - 1
                    ),
                ));
            }
        }

        let nodes = node_tokens
            .iter()
            .map(|t| {
                t.parse::<u32>()
                    .map(NodeId::new)
                    .map_err(|_| Error::at(line, raw, format!("invalid node '{t}'")))
            })
            .collect::<Result<Vec<_>>>()?;

        let value = ComponentValue::parse(tokens[tokens.len() - 1]);
        let component =
            Component::new(name, nodes, value).map_err(|e| Error::at(line, raw, e.to_string()))?;
        self.result.table.insert(component);
        Ok(())
    }

    fn parse_directive(&mut self, line: usize, raw: &str, directive: &str) -> Result<bool> {
        let keyword = directive
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_ascii_uppercase();
        match keyword.as_str() {
            "END" => return Ok(false),
            "MODEL" => self.parse_model(line, raw, directive)?,
            "AC" => self.result.ac = Some(parse_ac(line, raw, directive)?),
            _ => log::warn!("line {line}: ignoring unsupported directive .{keyword}"),
        }
        Ok(true)
    }

    /// Parse `.MODEL name [type][(]key=value ...[)]`.
    fn parse_model(&mut self, line: usize, raw: &str, directive: &str) -> Result<()> {
        let normalized = directive
            .replace(['(', ')', ','], " ")
            .replace('=', " = ");
        let tokens: Vec<&str> = normalized.split_whitespace().skip(1).collect();

        let Some((&name, rest)) = tokens.split_first() else {
            return Err(Error::at(line, raw, ".MODEL requires a name"));
        };

        // An optional device type (NPN, PNP, ...) precedes the parameters.
        let rest = match rest {
            [ty, next, ..] if *next != "=" && !ty.contains('=') => &rest[1..],
            [_] => &rest[1..],
            _ => rest,
        };

        let mut params = Vec::new();
        for chunk in rest.chunks(3) {
            match chunk {
                [key, "=", value] => {
                    let value = parse_value(value).ok_or_else(|| {
                        Error::at(line, raw, format!("invalid value '{value}' for {key}"))
                    })?;
                    params.push((key.to_string(), value));
                }
                _ => {
                    return Err(Error::at(
                        line,
                        raw,
                        format!("expected key=value, found '{}'", chunk.join(" ")),
                    ));
                }
            }
        }

        let model =
            HybridPiModel::from_params(name, &params).map_err(|e| Error::at(line, raw, e.to_string()))?;
        self.result.models.insert(name, model);
        Ok(())
    }
}

/// Parse `.AC LIN|DEC|OCT n fstart fstop`.
fn parse_ac(line: usize, raw: &str, directive: &str) -> Result<AcSweep> {
    let tokens: Vec<&str> = directive.split_whitespace().skip(1).collect();
    let &[ty, n, fstart, fstop] = tokens.as_slice() else {
        return Err(Error::at(line, raw, ".AC expects: type npoints fstart fstop"));
    };

    let sweep_type = match ty.to_ascii_uppercase().as_str() {
        "LIN" => AcSweepType::Lin,
        "DEC" => AcSweepType::Dec,
        "OCT" => AcSweepType::Oct,
        other => return Err(Error::at(line, raw, format!("unknown sweep type '{other}'"))),
    };
    let num_points = n
        .parse::<usize>()
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| Error::at(line, raw, format!("invalid point count '{n}'")))?;
    let freq = |t: &str| {
        parse_value(t)
            .filter(|f| *f > 0.0)
            .ok_or_else(|| Error::at(line, raw, format!("invalid frequency '{t}'")))
    };
    let fstart = freq(fstart)?;
    let fstop = freq(fstop)?;
    if fstop < fstart {
        return Err(Error::at(line, raw, "stop frequency is below start frequency"));
    }

    Ok(AcSweep {
        sweep_type,
        num_points,
        fstart,
        fstop,
    })
}
