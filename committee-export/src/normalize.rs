//! Flattens a committee-meeting detail payload into an export row.

use std::collections::HashMap;

use hearing_linkage::payload::{
    clean_text, coerce_to_objects, coerce_to_sequence, text_field, witness_name,
};
use hearing_linkage::timestamp::to_utc_iso;
use serde_json::{Map, Value};

use crate::export::MeetingExportRow;

type Payload = Map<String, Value>;

/// Committee system code to committee name, from the committee list endpoint.
pub type CommitteeLookup = HashMap<String, String>;

pub fn normalize_meeting_detail(
    detail: &Payload,
    committees: &CommitteeLookup,
    default_congress: u32,
) -> MeetingExportRow {
    let congress = match text_field(detail, &["congress"]) {
        c if c.is_empty() => default_congress.to_string(),
        c => c,
    };

    let (committee_codes, committee_names, subcommittee_name) =
        normalize_committees(detail, committees);

    let location = detail.get("location").and_then(Value::as_object);
    let location_field = |key: &str| {
        location
            .map(|location| text_field(location, &[key]))
            .unwrap_or_default()
    };

    let documents = list(detail, "documents");
    let witnesses: Vec<&Value> = coerce_to_sequence(detail.get("witnesses"))
        .into_iter()
        .filter(|witness| witness.is_object())
        .collect();
    let related_items = list(detail, "relatedItems");

    MeetingExportRow {
        event_id: text_field(detail, &["eventId", "eventID"]),
        congress,
        chamber: text_field(detail, &["chamber"]),
        meeting_type: canonical_meeting_type(&text_field(detail, &["meetingType"])),
        meeting_date_time: to_utc_iso(&text_field(detail, &["meetingDateTime", "date"])),
        status: text_field(detail, &["status"]),
        committee_codes,
        committee_names,
        subcommittee_name,
        title: text_field(detail, &["title"]),
        location_building: location_field("building"),
        location_room: location_field("room"),
        location_city: location_field("city"),
        location_state: location_field("state"),
        documents_count: documents.len(),
        documents_list: pipe_join(documents.iter().map(|doc| citation(doc))),
        witnesses_count: witnesses.len(),
        witnesses_list: pipe_join(witnesses.iter().map(|witness| witness_name(witness))),
        votes_list: pipe_join(
            list(detail, "votes")
                .iter()
                .map(|vote| text_field(vote, &["description"])),
        ),
        amendments_list: pipe_join(
            list(detail, "amendments")
                .iter()
                .map(|amendment| text_field(amendment, &["number", "description"])),
        ),
        related_bills_list: pipe_join(
            list(detail, "relatedBills")
                .iter()
                .map(|bill| text_field(bill, &["number"])),
        ),
        related_items_count: related_items.len(),
        related_items_summary: pipe_join(
            related_items
                .iter()
                .map(|item| text_field(item, &["description"])),
        ),
        meeting_detail_url: text_field(detail, &["url"]),
        update_date: to_utc_iso(&text_field(detail, &["updateDate", "updateDateTime"])),
        source_last_modified: to_utc_iso(&text_field(
            detail,
            &["lastModified", "lastModifiedDate"],
        )),
        ..Default::default()
    }
}

/// `hearing` → `Hearing`, `business meeting` → `Business Meeting`, anything else title-cased.
pub fn canonical_meeting_type(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return "Other".to_string();
    }

    match value.to_lowercase().as_str() {
        "hearing" => "Hearing".to_string(),
        "markup" => "Markup".to_string(),
        "business meeting" => "Business Meeting".to_string(),
        "field hearing" => "Field Hearing".to_string(),
        _ => title_case(value),
    }
}

fn title_case(value: &str) -> String {
    let mut previous_is_letter = false;
    value
        .chars()
        .map(|c| {
            let mapped: String = if previous_is_letter {
                c.to_lowercase().collect()
            } else {
                c.to_uppercase().collect()
            };
            previous_is_letter = c.is_alphabetic();
            mapped
        })
        .collect()
}

/// Joins the non-empty values with `|`.
pub fn pipe_join(values: impl IntoIterator<Item = String>) -> String {
    values
        .into_iter()
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>()
        .join("|")
}

fn list<'a>(detail: &'a Payload, key: &str) -> Vec<&'a Payload> {
    coerce_to_objects(detail.get(key))
}

fn citation(document: &Payload) -> String {
    format!(
        "{}:{}:{}",
        text_field(document, &["type"]),
        text_field(document, &["title"]),
        text_field(document, &["url"])
    )
}

fn normalize_committees(detail: &Payload, lookup: &CommitteeLookup) -> (String, String, String) {
    let mut codes: Vec<String> = Vec::new();
    let mut names: Vec<String> = Vec::new();
    let mut subcommittee_name = String::new();

    let committees = match detail.get("committees") {
        Some(value) if !value.is_null() => coerce_to_objects(Some(value)),
        _ => coerce_to_objects(detail.get("committee")),
    };

    for entry in committees {
        let name = text_field(entry, &["name"]);

        let system_code = text_field(entry, &["systemCode"]);
        if !system_code.is_empty() {
            let known_name = lookup
                .get(&system_code)
                .map(|n| clean_text(n))
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| name.clone());
            codes.push(system_code);
            names.push(known_name);
        }

        if !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }

        let subcommittee = text_field(entry, &["subcommittee"]);
        if !subcommittee.is_empty() {
            subcommittee_name = subcommittee;
        }
    }

    (pipe_join(codes), pipe_join(names), subcommittee_name)
}
