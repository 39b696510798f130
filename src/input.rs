use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::RouteError;
use crate::network::{Topology, TopologyChange};
use crate::RouterId;

/// Message to forward once per convergence round. The text is carried
/// verbatim into the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub source: RouterId,
    pub destination: RouterId,
    pub text: String,
}

/// Non-blank lines with their 1-based line numbers.
fn records(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(number, line)| (number + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

fn malformed(origin: &str, line: usize, reason: impl Into<String>) -> RouteError {
    RouteError::MalformedRecord {
        file: origin.to_string(),
        line,
        reason: reason.into(),
    }
}

fn parse_router(token: &str, origin: &str, line: usize) -> Result<RouterId, RouteError> {
    token
        .parse()
        .map_err(|_| malformed(origin, line, format!("invalid router id {:?}", token)))
}

fn parse_triple(
    line: &str,
    origin: &str,
    number: usize,
) -> Result<(RouterId, RouterId, i64), RouteError> {
    match line.split_whitespace().collect::<Vec<_>>().as_slice() {
        [a, b, cost] => {
            let a = parse_router(a, origin, number)?;
            let b = parse_router(b, origin, number)?;
            let cost = cost
                .parse()
                .map_err(|_| malformed(origin, number, format!("invalid cost {:?}", cost)))?;
            Ok((a, b, cost))
        }
        _ => Err(malformed(
            origin,
            number,
            format!("expected 'a b cost', got {:?}", line),
        )),
    }
}

/// Parses `a b cost` triples into a topology. Later lines for the same
/// router pair replace earlier ones.
pub fn parse_topology(content: &str, origin: &str) -> Result<Topology, RouteError> {
    let mut topology = Topology::new();
    for (number, line) in records(content) {
        let (a, b, cost) = parse_triple(line, origin, number)?;
        topology
            .upsert(a, b, cost)
            .map_err(|e| malformed(origin, number, e.to_string()))?;
    }
    Ok(topology)
}

/// Parses `source destination text` lines. The text keeps every byte after
/// the second separating space, interior spaces included.
pub fn parse_messages(content: &str, origin: &str) -> Result<Vec<Message>, RouteError> {
    let mut messages = Vec::new();
    for (number, line) in records(content) {
        let mut parts = line.splitn(3, ' ');
        let (Some(source), Some(destination), Some(text)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed(
                origin,
                number,
                "expected 'source destination text'",
            ));
        };
        messages.push(Message {
            source: parse_router(source, origin, number)?,
            destination: parse_router(destination, origin, number)?,
            text: text.to_string(),
        });
    }
    Ok(messages)
}

/// Parses `a b cost` change triples. Costs are kept signed here: the removal
/// sentinel and other negative values are judged when the change is applied.
pub fn parse_changes(content: &str, origin: &str) -> Result<Vec<TopologyChange>, RouteError> {
    records(content)
        .map(|(number, line)| {
            let (a, b, cost) = parse_triple(line, origin, number)?;
            Ok(TopologyChange { a, b, cost })
        })
        .collect()
}

pub fn read_topology(path: &Path) -> Result<Topology> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read topology file {}", path.display()))?;
    let topology = parse_topology(&content, &path.display().to_string())?;
    debug!(
        "Loaded {} links over {} routers from {}",
        topology.link_count(),
        topology.nodes().len(),
        path.display()
    );
    Ok(topology)
}

pub fn read_messages(path: &Path) -> Result<Vec<Message>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read message file {}", path.display()))?;
    let messages = parse_messages(&content, &path.display().to_string())?;
    debug!("Loaded {} messages from {}", messages.len(), path.display());
    Ok(messages)
}

pub fn read_changes(path: &Path) -> Result<Vec<TopologyChange>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read changes file {}", path.display()))?;
    let changes = parse_changes(&content, &path.display().to_string())?;
    debug!("Loaded {} changes from {}", changes.len(), path.display());
    Ok(changes)
}
