use std::fs::File;
use std::io::{stdin, BufRead, BufReader, Cursor};
use std::path::Path;

use anyhow::{anyhow, bail, Result};
use log::debug;
use paste::paste;

use rd_generation::Template;
use rd_generation::validate_sequence;
use rd_ranking::ScoredDesign;

// ============================================================
//  Template files
// ============================================================

/// Name given to a template without header.
fn default_name(index: usize) -> String {
    format!("template_{}", index + 1)
}

fn header_name(line: &str) -> Option<String> {
    line.strip_prefix('>')
        .and_then(|s| s.split_whitespace().next())
        .map(str::to_string)
}

/// Lines collected for one template so far.
#[derive(Default)]
struct PendingTemplate {
    name: Option<String>,
    lines: Vec<String>,
}

impl PendingTemplate {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.lines.is_empty()
    }

    fn finish(self, index: usize, cutsite: Option<usize>) -> Result<Template> {
        let name = self.name.unwrap_or_else(|| default_name(index));
        let [seq, st, sub, sub_st] = <[String; 4]>::try_from(self.lines).map_err(|lines| {
            anyhow!("Template {}: expected 4 lines (sequence, structure, substrate, substrate structure), found {}",
                name, lines.len())
        })?;
        let mut template = Template::new(&seq, &st, &sub, &sub_st).with_name(&name);
        template.cutsite = cutsite;
        Ok(template)
    }
}

/// Reads one or more ribozyme templates.
///
/// Each template is an optional `>name` header followed by four lines:
/// ribozyme sequence, ribozyme structure, substrate template and
/// substrate structure. An optional fifth line holds the cut-site
/// position. Templates are separated by blank lines or headers. Only
/// the first whitespace-separated token of a line is used.
pub fn read_templates<R: BufRead>(reader: R) -> Result<Vec<Template>> {
    let mut templates = Vec::new();
    let mut pending = PendingTemplate::default();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() {
            if !pending.is_empty() {
                let done = std::mem::take(&mut pending);
                templates.push(done.finish(templates.len(), None)?);
            }
            continue;
        }

        if line.starts_with('>') {
            if !pending.is_empty() {
                let done = std::mem::take(&mut pending);
                templates.push(done.finish(templates.len(), None)?);
            }
            pending.name = header_name(line);
            continue;
        }

        let Some(token) = line.split_whitespace().next() else {
            continue;
        };
        if pending.lines.len() == 4 {
            let done = std::mem::take(&mut pending);
            match token.parse::<usize>() {
                Ok(cutsite) => {
                    templates.push(done.finish(templates.len(), Some(cutsite))?);
                    continue;
                }
                Err(_) => templates.push(done.finish(templates.len(), None)?),
            }
        }
        pending.lines.push(token.to_string());
    }
    if !pending.is_empty() {
        templates.push(pending.finish(templates.len(), None)?);
    }

    if templates.is_empty() {
        bail!("No template found in input");
    }
    debug!("Read {} templates.", templates.len());
    Ok(templates)
}

// ============================================================
//  Target files
// ============================================================

/// Reads the target RNA: an optional header, then the sequence,
/// possibly spread over several lines. DNA input is converted to RNA.
pub fn read_target<R: BufRead>(reader: R) -> Result<(Option<String>, String)> {
    let mut header: Option<String> = None;
    let mut target = String::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('>') {
            if !target.is_empty() {
                break;
            }
            header = Some(line.to_string());
            continue;
        }
        target.extend(line.chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c.to_ascii_uppercase() {
                'T' => 'U',
                c => c,
            }));
    }

    if let Err(e) = validate_sequence(&target, true) {
        bail!("Invalid target sequence: {}", e);
    }
    Ok((header, target))
}

// ============================================================
//  Scored design files
// ============================================================

/// Reads a JSON list of scored designs.
pub fn read_designs<R: BufRead>(reader: R) -> Result<Vec<ScoredDesign>> {
    Ok(serde_json::from_reader(reader)?)
}

// ============================================================
//  Macro generating file/string/stdin/input helpers
// ============================================================

/// Generate input adapters for a base parser function `fn base<R: BufRead>(R) -> Result<T>`.
///
/// This expands into:
/// - `base_string(&str)`
/// - `base_file<P: AsRef<Path>>(P)`
/// - `base_stdin()`
/// - `base_input(&str)`  (dispatches "-" → stdin, otherwise → file)
macro_rules! define_input_variants {
    ($base:ident, $ret:ty) => {
        paste! {
            /// Read from a string buffer.
            pub fn [<$base _string>](s: &str) -> $ret {
                $base(Cursor::new(s))
            }

            /// Read from a file path.
            pub fn [<$base _file>]<P: AsRef<Path>>(path: P) -> $ret {
                let reader = BufReader::new(File::open(path)?);
                $base(reader)
            }

            /// Read from stdin.
            pub fn [<$base _stdin>]() -> $ret {
                let reader = BufReader::new(stdin());
                $base(reader)
            }

            /// Read either from stdin ("-") or a file path.
            pub fn [<$base _input>](s: &str) -> $ret {
                if s == "-" {
                    [<$base _stdin>]()
                } else {
                    [<$base _file>](s)
                }
            }
        }
    };
}

type TemplatesResult = Result<Vec<Template>>;
type TargetResult = Result<(Option<String>, String)>;
type DesignsResult = Result<Vec<ScoredDesign>>;

define_input_variants!(read_templates, TemplatesResult);
define_input_variants!(read_target, TargetResult);
define_input_variants!(read_designs, DesignsResult);
