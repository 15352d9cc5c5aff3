use crate::domain::model::{
    AttachmentInfo, GameInfo, GradeInfo, NormalizedCertification, RawGame, RawGrade, RawRecord,
};
use crate::utils::error::{LookupError, Result};
use chrono::NaiveDateTime;

const NOT_AVAILABLE: &str = "N/A";
const VARIANT_BULLET: &str = "• ";

/// Registry timestamps look like `2023-04-12T10:30:00.123456Z`.
const REGISTRY_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Converts a raw registry record into the canonical certificate shape.
///
/// Pure, no I/O. The only failure mode is a record missing one of the
/// structurally required fields (`label`, `game`, `grade`); every other
/// absent or null field degrades to `N/A` or is omitted.
pub fn normalize(raw: RawRecord) -> Result<NormalizedCertification> {
    let label = raw.label.ok_or_else(|| missing("label"))?;
    let game = raw.game.ok_or_else(|| missing("game"))?;
    let grade = raw.grade.ok_or_else(|| missing("grade"))?;

    let grading_date = grading_date(&raw.attachments);

    Ok(NormalizedCertification {
        label,
        game: normalize_game(game),
        region: raw.region.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        grade: normalize_grade(grade),
        grading_date,
        attachments: raw
            .attachments
            .into_iter()
            .map(|a| AttachmentInfo {
                attachment_type_id: a.attachment_type_id,
                created_at: a.created_at,
                high_res_url: a.high_res_url,
            })
            .collect(),
    })
}

fn missing(field: &str) -> LookupError {
    LookupError::MalformedRecord {
        field: field.to_string(),
    }
}

/// `N/A` unless attachment 0 carries a parseable `createdAt`, reformatted to
/// `DD-MM-YYYY`.
fn grading_date(attachments: &[crate::domain::model::RawAttachment]) -> String {
    attachments
        .first()
        .and_then(|a| a.created_at.as_deref())
        .and_then(|ts| NaiveDateTime::parse_from_str(ts, REGISTRY_TIMESTAMP_FORMAT).ok())
        .map(|dt| dt.format("%d-%m-%Y").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn normalize_game(game: RawGame) -> GameInfo {
    GameInfo {
        name: game.name.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        platforms: game.platforms.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        year: game
            .year
            .map(|y| match y {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        publisher: game.publisher.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        img_url: game.img_url,
    }
}

fn normalize_grade(grade: RawGrade) -> GradeInfo {
    // Instruction and cartridge only mean anything as a pair.
    let (instruction, cartridge) = match (grade.instruction, grade.cartridge) {
        (Some(instruction), Some(cartridge)) => (Some(instruction), Some(cartridge)),
        _ => (None, None),
    };

    GradeInfo {
        overall_grade: grade
            .overall_grade
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        box_grade: grade.box_grade.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        seal: normalize_seal(grade.seal),
        instruction,
        cartridge,
        variants: grade.variants.map(|variants| {
            variants
                .into_iter()
                .map(|v| format!("{}{}", VARIANT_BULLET, v.replace('*', "")))
                .collect()
        }),
        notes: grade.notes,
    }
}

/// The registry uses both the literal string `"NULL"` and the empty string as
/// "no seal grade" sentinels.
fn normalize_seal(seal: Option<String>) -> String {
    match seal.as_deref() {
        None | Some("NULL") | Some("") => NOT_AVAILABLE.to_string(),
        Some(value) => value.to_string(),
    }
}
