//! Anchor discovery and edit construction.
//!
//! Anchors are located per patch run over the scanned text nodes and turned
//! straight into [`Splice`]s; nothing here is persisted. Three families:
//! contact values (placeholder substitution anywhere in the document), skill
//! category labels (label node → value node), and company headings (a window
//! of bullet nodes bounded by the next company or a terminal section label).

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::config::{ExtraBulletPolicy, Heuristics, PatchOptions};
use crate::errors::Warning;
use crate::models::ContactInfo;
use crate::patch::markup::{escape_text, Splice, TextNode};

/// Minimum trimmed length for a window node to count as a bullet slot.
/// Shorter nodes are headings, dates, or locations.
pub(crate) const MIN_BULLET_CHARS: usize = 30;
/// Longest node that can still act as a company heading.
const MAX_COMPANY_NODE_CHARS: usize = 80;

pub(crate) struct ContactEdits {
    pub splices: Vec<Splice>,
    pub anchored: usize,
    pub warnings: Vec<Warning>,
}

/// Replaces placeholder contact strings with the resume's real values.
///
/// All fields are folded into a single pass per node, because templates
/// often put email and phone on one line: one node gets at most one splice
/// carrying every field's replacement. A field counts as anchored when a
/// placeholder was found, when the real value is already in the document,
/// or when the document has a slot the resume cannot fill (template is
/// fine, data is missing). Only a present value with no slot at all warns.
pub(crate) fn contact_edits(
    nodes: &[TextNode],
    contact: &ContactInfo,
    heuristics: &Heuristics,
) -> ContactEdits {
    let placeholders = &heuristics.contact_placeholders;
    let fields: [(&str, Option<&str>, &[String]); 3] = [
        ("email", contact.email.as_deref(), &placeholders.email),
        ("phone", contact.phone.as_deref(), &placeholders.phone),
        (
            "link",
            contact.links.first().map(String::as_str),
            &placeholders.link,
        ),
    ];

    let mut splices = Vec::new();
    let mut found = [false; 3];

    for node in nodes {
        let mut updated = node.text.clone();
        let mut changed = false;
        for (i, (label, value, candidates)) in fields.iter().enumerate() {
            let Some(value) = value else {
                if candidates
                    .iter()
                    .any(|c| !c.is_empty() && node.text.contains(c.as_str()))
                {
                    found[i] = true;
                }
                continue;
            };
            for candidate in candidates.iter() {
                if !candidate.is_empty() && updated.contains(candidate.as_str()) {
                    updated = updated.replace(candidate.as_str(), value);
                    changed = true;
                    found[i] = true;
                    debug!(field = *label, "contact placeholder replaced");
                }
            }
            if node.text.contains(value) {
                // Already personalized.
                found[i] = true;
            }
        }
        if changed {
            splices.push(Splice {
                range: node.range.clone(),
                replacement: escape_text(&updated),
            });
        }
    }

    let mut warnings = Vec::new();
    let mut anchored = 0;
    for (i, (label, value, _)) in fields.iter().enumerate() {
        if found[i] {
            anchored += 1;
        } else if value.is_some() {
            warn!(field = *label, "no contact anchor found");
            warnings.push(Warning::AnchorNotFound {
                anchor: format!("contact {label}"),
            });
        }
    }

    ContactEdits {
        splices,
        anchored,
        warnings,
    }
}

pub(crate) struct SkillEdits {
    pub splices: Vec<Splice>,
    pub anchored: usize,
    pub warnings: Vec<Warning>,
}

/// Rewrites skill category values in place.
///
/// Two template shapes are handled: a label node followed by a value node,
/// and a single `Label: value` node whose tail is replaced. A label that
/// cannot be located leaves that category untouched and warns.
pub(crate) fn skill_edits(
    nodes: &[TextNode],
    skill_text: &IndexMap<String, String>,
) -> SkillEdits {
    let mut splices = Vec::new();
    let mut warnings = Vec::new();
    let mut anchored = 0;

    for (label, value) in skill_text {
        match find_skill_anchor(nodes, label) {
            Some(SkillAnchor::LabelOnly(idx)) => {
                anchored += 1;
                match nodes.get(idx + 1) {
                    Some(next) if !is_any_label(next, skill_text, label) => {
                        debug!(category = %label, "skill value node replaced");
                        splices.push(Splice {
                            range: next.range.clone(),
                            replacement: escape_text(value),
                        });
                    }
                    // No safely scoped value node; leave the original text.
                    _ => debug!(category = %label, "skill label has no value node, skipped"),
                }
            }
            Some(SkillAnchor::Inline(idx)) => {
                anchored += 1;
                let node = &nodes[idx];
                let lead_len = node.text.len() - node.text.trim_start().len();
                let lead = &node.text[..lead_len];
                let head = &node.text[lead_len..lead_len + label.len()];
                debug!(category = %label, "inline skill value replaced");
                splices.push(Splice {
                    range: node.range.clone(),
                    replacement: escape_text(&format!("{lead}{head}: {value}")),
                });
            }
            None => {
                warn!(category = %label, "skill category label not found");
                warnings.push(Warning::AnchorNotFound {
                    anchor: format!("skill category '{label}'"),
                });
            }
        }
    }

    SkillEdits {
        splices,
        anchored,
        warnings,
    }
}

enum SkillAnchor {
    /// Node holds only the label; the value is the following text node.
    LabelOnly(usize),
    /// Node holds `Label: value`; the tail after the colon is the value.
    Inline(usize),
}

fn find_skill_anchor(nodes: &[TextNode], label: &str) -> Option<SkillAnchor> {
    for (idx, node) in nodes.iter().enumerate() {
        let trimmed = node.text.trim();
        if trimmed.eq_ignore_ascii_case(label)
            || trimmed
                .strip_suffix(':')
                .is_some_and(|t| t.trim_end().eq_ignore_ascii_case(label))
        {
            return Some(SkillAnchor::LabelOnly(idx));
        }
        if starts_with_ignore_ascii_case(trimmed, label)
            && trimmed[label.len()..].trim_start().starts_with(':')
        {
            return Some(SkillAnchor::Inline(idx));
        }
    }
    None
}

fn is_any_label(node: &TextNode, skill_text: &IndexMap<String, String>, except: &str) -> bool {
    let trimmed = node.text.trim().trim_end_matches(':').trim_end();
    skill_text
        .keys()
        .any(|k| k != except && trimmed.eq_ignore_ascii_case(k))
}

pub(crate) struct ExperienceEdits {
    pub splices: Vec<Splice>,
    pub warnings: Vec<Warning>,
}

/// Replaces bullet text company by company.
///
/// Each company heading opens a window that runs to the next company heading
/// or the first terminal section label. Nodes in the window whose trimmed
/// length clears [`MIN_BULLET_CHARS`] are the bullet slots, replaced in
/// order. Surplus plan bullets follow the configured [`ExtraBulletPolicy`].
pub(crate) fn experience_edits(
    xml: &str,
    nodes: &[TextNode],
    experience_bullets: &IndexMap<String, Vec<String>>,
    heuristics: &Heuristics,
    options: &PatchOptions,
) -> ExperienceEdits {
    let mut splices = Vec::new();
    let mut warnings = Vec::new();

    // Company anchors in document order; each plan company binds to its
    // first occurrence only.
    let mut bound: HashSet<&str> = HashSet::new();
    let mut anchors: Vec<(&str, usize)> = Vec::new();
    for (idx, node) in nodes.iter().enumerate() {
        let trimmed = node.text.trim();
        if trimmed.chars().count() > MAX_COMPANY_NODE_CHARS {
            continue;
        }
        for company in experience_bullets.keys() {
            if !bound.contains(company.as_str())
                && contains_ignore_ascii_case(trimmed, company)
            {
                bound.insert(company.as_str());
                anchors.push((company.as_str(), idx));
                break;
            }
        }
    }

    for company in experience_bullets.keys() {
        if !bound.contains(company.as_str()) {
            warn!(company = %company, "company heading not found in document");
            warnings.push(Warning::AnchorNotFound {
                anchor: format!("company '{company}'"),
            });
        }
    }

    let terminals: Vec<usize> = nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| {
            let label = node.text.trim().trim_end_matches(':').trim_end();
            heuristics
                .terminal_labels
                .iter()
                .any(|t| label.eq_ignore_ascii_case(t))
        })
        .map(|(idx, _)| idx)
        .collect();

    for (pos, (company, anchor_node)) in anchors.iter().enumerate() {
        let next_company = anchors
            .get(pos + 1)
            .map(|(_, idx)| *idx)
            .unwrap_or(nodes.len());
        let next_terminal = terminals
            .iter()
            .copied()
            .find(|t| t > anchor_node)
            .unwrap_or(nodes.len());
        let window_end = next_company.min(next_terminal);

        let slots: Vec<usize> = (anchor_node + 1..window_end)
            .filter(|&i| nodes[i].text.trim().chars().count() >= MIN_BULLET_CHARS)
            .collect();
        let bullets = &experience_bullets[*company];

        debug!(
            company = %company,
            slots = slots.len(),
            bullets = bullets.len(),
            "patching experience window"
        );

        for (slot, bullet) in slots.iter().zip(bullets.iter()) {
            splices.push(Splice {
                range: nodes[*slot].range.clone(),
                replacement: escape_text(bullet),
            });
        }

        let extra = bullets.len().saturating_sub(slots.len());
        if extra == 0 {
            continue;
        }
        match options.extra_bullets {
            ExtraBulletPolicy::Append => {
                let appended = slots
                    .last()
                    .and_then(|&last| append_splices(xml, &nodes[last], &bullets[slots.len()..]));
                match appended {
                    Some(mut extra_splices) => splices.append(&mut extra_splices),
                    None => {
                        warn!(company = %company, extra, "no paragraph to clone, dropping extra bullets");
                        warnings.push(Warning::ExtraBulletsDropped {
                            company: (*company).to_string(),
                            count: extra,
                        });
                    }
                }
            }
            ExtraBulletPolicy::Drop => {
                warn!(company = %company, extra, "dropping extra bullets");
                warnings.push(Warning::ExtraBulletsDropped {
                    company: (*company).to_string(),
                    count: extra,
                });
            }
        }
    }

    ExperienceEdits { splices, warnings }
}

/// Clones the slot node's paragraph once per extra bullet, swapping in the
/// new text, and inserts the clones after the paragraph. Returns `None`
/// when the node's paragraph cannot be scoped.
fn append_splices(xml: &str, node: &TextNode, extras: &[String]) -> Option<Vec<Splice>> {
    let paragraph = node.paragraph.clone()?;
    let raw = xml.get(paragraph.clone())?;
    let rel_start = node.range.start.checked_sub(paragraph.start)?;
    let rel_end = node.range.end.checked_sub(paragraph.start)?;
    if rel_end > raw.len() {
        return None;
    }

    Some(
        extras
            .iter()
            .map(|text| Splice {
                range: paragraph.end..paragraph.end,
                replacement: format!(
                    "{}{}{}",
                    &raw[..rel_start],
                    escape_text(text),
                    &raw[rel_end..]
                ),
            })
            .collect(),
    )
}

fn starts_with_ignore_ascii_case(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len()
        && text.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
