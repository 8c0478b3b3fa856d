//! Streaming parser for `List of Accounts` exports.
//!
//! The ERP nests the fields we read at varying depths (`ADDRESS` sits inside
//! `ADDRESS.LIST`, state names inside mailing-detail lists), so a field is
//! taken from its first occurrence anywhere inside the `GROUP` or `LEDGER`
//! element. `ADDRESS` is the one repeated field and keeps every line.

use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use recon_core::entities::{GroupEdge, LedgerRecord};
use tracing::debug;

use crate::error::ErpError;

const STATE_TAGS: [&str; 4] = ["STATENAME", "LEDSTATENAME", "MAILSTATENAME", "PRIORSTATENAME"];
const PHONE_TAGS: [&str; 3] = ["PHONE", "LEDGERPHONE", "LEDGERMOBILE"];

/// Parse `GROUP` elements into hierarchy edges.
///
/// Placeholder and empty names are kept; the hierarchy resolver drops and
/// counts them.
///
/// # Errors
///
/// Returns [`ErpError::Xml`] for malformed XML and [`ErpError::Rejected`] when
/// the document is an ERP error reply.
pub fn parse_groups(xml: &str) -> Result<Vec<GroupEdge>, ErpError> {
    let groups: Vec<GroupEdge> = scan(xml)?
        .into_iter()
        .filter(|block| block.kind == BlockKind::Group)
        .map(|block| GroupEdge::new(block.name, block.fields.first("PARENT")))
        .collect();
    debug!(count = groups.len(), "parsed group export");
    Ok(groups)
}

/// Parse `LEDGER` elements into raw ledger records.
///
/// # Errors
///
/// Same as [`parse_groups`].
pub fn parse_ledgers(xml: &str) -> Result<Vec<LedgerRecord>, ErpError> {
    let ledgers: Vec<LedgerRecord> = scan(xml)?
        .into_iter()
        .filter(|block| block.kind == BlockKind::Ledger)
        .map(Block::into_ledger)
        .collect();
    debug!(count = ledgers.len(), "parsed ledger export");
    Ok(ledgers)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Group,
    Ledger,
}

#[derive(Debug, Default)]
struct Fields {
    first: HashMap<String, String>,
    addresses: Vec<String>,
}

impl Fields {
    fn record(&mut self, tag: &str, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        if tag == "ADDRESS" {
            self.addresses.push(text.to_owned());
        } else {
            self.first
                .entry(tag.to_owned())
                .or_insert_with(|| text.to_owned());
        }
    }

    fn first(&self, tag: &str) -> String {
        self.first.get(tag).cloned().unwrap_or_default()
    }

    fn first_of(&self, tags: &[&str]) -> String {
        tags.iter()
            .find_map(|tag| self.first.get(*tag))
            .cloned()
            .unwrap_or_default()
    }
}

#[derive(Debug)]
struct Block {
    kind: BlockKind,
    name: String,
    fields: Fields,
}

impl Block {
    fn into_ledger(self) -> LedgerRecord {
        let fields = self.fields;
        LedgerRecord {
            name: self.name,
            parent: fields.first("PARENT"),
            opening_balance: fields.first("OPENINGBALANCE"),
            closing_balance: fields.first("CLOSINGBALANCE"),
            gstin: fields.first_of(&["GSTIN", "PARTYGSTIN"]),
            gst_reg_type: fields.first("GSTREGISTRATIONTYPE"),
            pan: fields.first("INCOMETAXNUMBER"),
            state: fields.first_of(&STATE_TAGS),
            country: fields.first_of(&["COUNTRY", "COUNTRYNAME"]),
            pincode: fields.first("PINCODE"),
            phone: fields.first_of(&PHONE_TAGS),
            email: fields.first("EMAIL"),
            address_lines: fields.addresses,
        }
    }
}

fn tag_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn name_attr(e: &BytesStart<'_>) -> Result<String, ErpError> {
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.local_name().as_ref() == b"NAME" {
            return Ok(attr.unescape_value()?.trim().to_owned());
        }
    }
    Ok(String::new())
}

fn block_kind(tag: &str) -> Option<BlockKind> {
    match tag {
        "GROUP" => Some(BlockKind::Group),
        "LEDGER" => Some(BlockKind::Ledger),
        _ => None,
    }
}

fn scan(xml: &str) -> Result<Vec<Block>, ErpError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut blocks = Vec::new();
    let mut open: Option<Block> = None;
    // elements opened inside the current block, innermost last
    let mut path: Vec<String> = Vec::new();
    let mut in_line_error = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let tag = tag_name(&e);
                if open.is_some() {
                    path.push(tag);
                } else if let Some(kind) = block_kind(&tag) {
                    open = Some(Block {
                        kind,
                        name: name_attr(&e)?,
                        fields: Fields::default(),
                    });
                } else if tag == "LINEERROR" {
                    in_line_error = true;
                }
            }
            Event::Empty(e) => {
                if open.is_none()
                    && let Some(kind) = block_kind(&tag_name(&e))
                {
                    blocks.push(Block {
                        kind,
                        name: name_attr(&e)?,
                        fields: Fields::default(),
                    });
                }
            }
            Event::Text(e) => {
                let text = e.unescape()?;
                if in_line_error {
                    return Err(ErpError::Rejected(text.trim().to_owned()));
                }
                if let (Some(block), Some(tag)) = (open.as_mut(), path.last()) {
                    block.fields.record(tag, &text);
                }
            }
            Event::CData(e) => {
                if let (Some(block), Some(tag)) = (open.as_mut(), path.last()) {
                    block.fields.record(tag, &String::from_utf8_lossy(&e));
                }
            }
            Event::End(_) => {
                if open.is_some() {
                    if path.pop().is_none()
                        && let Some(block) = open.take()
                    {
                        blocks.push(block);
                    }
                } else {
                    in_line_error = false;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(blocks)
}
