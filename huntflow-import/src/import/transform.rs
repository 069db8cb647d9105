//! Turn a spreadsheet row into API payloads
//!
//! Both builders are pure: they read the row and the upload/creation
//! responses and never touch the network.

use crate::api::models::EXTERNAL_AUTH_TYPE;
use crate::api::{
    CandidatePayload, CandidateRecord, ExternalData, ExternalEntry, FileRef, LinkPayload,
    ResumeUpload,
};

use super::error::RowError;
use super::workbook::{SheetRow, columns};

/// Split name of a candidate, each part capitalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName {
    pub last: String,
    pub first: String,
    /// Empty when the full name has only two tokens
    pub middle: String,
}

/// Parse "Last First [Middle...]"
pub fn parse_name(full_name: &str) -> Result<PersonName, RowError> {
    let mut tokens = full_name.split_whitespace();

    let (Some(last), Some(first)) = (tokens.next(), tokens.next()) else {
        return Err(RowError::MalformedName {
            value: full_name.trim().to_string(),
        });
    };

    let middle: Vec<String> = tokens.map(capitalize).collect();

    Ok(PersonName {
        last: capitalize(last),
        first: capitalize(first),
        middle: middle.join(" "),
    })
}

/// First character uppercased, the rest lowercased
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Normalize compensation text to "<integer> <currency>"
///
/// A trailing alphabetic token is the currency label; otherwise
/// `default_currency` applies. The remaining tokens are joined without
/// separators, so "150 000" reads as 150000.
pub fn normalize_money(raw: &str, default_currency: &str) -> Result<String, RowError> {
    let invalid = || RowError::InvalidCompensation {
        value: raw.trim().to_string(),
    };

    let mut tokens: Vec<&str> = raw.split_whitespace().collect();

    let currency = match tokens.last() {
        Some(last) if last.chars().all(char::is_alphabetic) => {
            let currency = last.to_string();
            tokens.pop();
            currency
        }
        Some(_) => default_currency.to_string(),
        None => return Err(invalid()),
    };

    let amount: f64 = tokens.concat().parse().map_err(|_| invalid())?;
    if !amount.is_finite() {
        return Err(invalid());
    }

    let truncated = amount.trunc();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return Err(invalid());
    }

    Ok(format!("{} {}", truncated as i64, currency))
}

/// Build the candidate creation body from a row and its resume upload
pub fn build_candidate_payload(
    row: &SheetRow,
    upload: &ResumeUpload,
    default_currency: &str,
) -> Result<CandidatePayload, RowError> {
    let position = row.require(columns::OPENING)?.to_string();
    let name = parse_name(row.require(columns::FULL_NAME)?)?;
    let money = normalize_money(row.require(columns::COMPENSATION)?, default_currency)?;

    let fields = upload.fields.as_ref();

    let phone = fields
        .and_then(|f| f.phones.as_ref())
        .and_then(|phones| phones.first())
        .cloned();
    let email = fields.and_then(|f| f.email.clone());
    let birthdate = fields.and_then(|f| f.birthdate.as_ref());

    Ok(CandidatePayload {
        last_name: name.last,
        first_name: name.first,
        middle_name: name.middle,
        phone,
        email,
        position,
        company: None,
        money,
        birthday_day: birthdate.and_then(|b| b.day),
        birthday_month: birthdate.and_then(|b| b.month),
        birthday_year: birthdate.and_then(|b| b.year),
        photo: upload.photo.as_ref().map(|p| p.id),
        externals: vec![ExternalEntry {
            data: ExternalData {
                body: upload.text.clone(),
            },
            files: vec![FileRef { id: upload.id }],
            auth_type: EXTERNAL_AUTH_TYPE.to_string(),
        }],
    })
}

/// Build the body that places a created candidate on an opening at a stage
pub fn build_link_payload(
    row: &SheetRow,
    opening_id: i64,
    stage_id: i64,
    candidate: &CandidateRecord,
) -> Result<LinkPayload, RowError> {
    let comment = row
        .cell(columns::COMMENT)
        .ok_or(RowError::MissingComment)?
        .to_string();

    Ok(LinkPayload {
        vacancy: opening_id,
        status: stage_id,
        comment,
        files: candidate.external.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{BirthDate, ParsedFields, PhotoRef};

    const RUBLES: &str = "рублей";

    fn row(values: [&str; 5]) -> SheetRow {
        SheetRow::new(2, values.iter().map(|v| Some(v.to_string())).collect())
    }

    fn sample_row() -> SheetRow {
        row([
            " Frontend-разработчик ",
            "ivanov PETR sergeevich",
            "150000 USD",
            " Strong candidate ",
            "Interview",
        ])
    }

    #[test]
    fn test_parse_name_three_tokens() {
        let name = parse_name("Ivanov Petr Sergeevich").unwrap();
        assert_eq!(name.last, "Ivanov");
        assert_eq!(name.first, "Petr");
        assert_eq!(name.middle, "Sergeevich");
    }

    #[test]
    fn test_parse_name_two_tokens_has_empty_middle() {
        let name = parse_name("  смирнова   анна ").unwrap();
        assert_eq!(name.last, "Смирнова");
        assert_eq!(name.first, "Анна");
        assert_eq!(name.middle, "");
    }

    #[test]
    fn test_parse_name_joins_extra_tokens() {
        let name = parse_name("Aliev Ruslan ALI ogly").unwrap();
        assert_eq!(name.middle, "Ali Ogly");
    }

    #[test]
    fn test_parse_name_single_token_fails() {
        assert!(matches!(
            parse_name("Ivanov"),
            Err(RowError::MalformedName { .. })
        ));
        assert!(matches!(parse_name("   "), Err(RowError::MalformedName { .. })));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("pETR"), "Petr");
        assert_eq!(capitalize("ЁЖИК"), "Ёжик");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_normalize_money_with_currency() {
        assert_eq!(normalize_money("150000 USD", RUBLES).unwrap(), "150000 USD");
        assert_eq!(normalize_money("150 000 руб", RUBLES).unwrap(), "150000 руб");
    }

    #[test]
    fn test_normalize_money_default_currency() {
        assert_eq!(normalize_money("150000", RUBLES).unwrap(), "150000 рублей");
        assert_eq!(normalize_money("99999.99", RUBLES).unwrap(), "99999 рублей");
    }

    #[test]
    fn test_normalize_money_rejects_non_numeric() {
        for raw in ["по договоренности 1", "abc$ USD", "USD", "", "150,5 EUR", "inf"] {
            assert!(
                matches!(
                    normalize_money(raw, RUBLES),
                    Err(RowError::InvalidCompensation { .. })
                ),
                "expected failure for {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_normalize_money_rejects_out_of_range() {
        for raw in ["9223372036854775808", "10000000000000000000 USD", "-1e30"] {
            assert!(
                matches!(
                    normalize_money(raw, RUBLES),
                    Err(RowError::InvalidCompensation { .. })
                ),
                "expected failure for {:?}",
                raw
            );
        }
        assert_eq!(
            normalize_money("9223372036854774784", RUBLES).unwrap(),
            "9223372036854774784 рублей"
        );
    }

    #[test]
    fn test_candidate_payload_full_upload() {
        let upload = ResumeUpload {
            id: 55,
            text: Some("Experienced developer".into()),
            photo: Some(PhotoRef { id: 9 }),
            fields: Some(ParsedFields {
                phones: Some(vec!["+7 900 111-22-33".into(), "+7 900 000-00-00".into()]),
                email: Some("petr@example.com".into()),
                birthdate: Some(BirthDate {
                    day: Some(1),
                    month: Some(2),
                    year: Some(1990),
                }),
            }),
        };

        let payload = build_candidate_payload(&sample_row(), &upload, RUBLES).unwrap();

        assert_eq!(payload.last_name, "Ivanov");
        assert_eq!(payload.first_name, "Petr");
        assert_eq!(payload.middle_name, "Sergeevich");
        assert_eq!(payload.position, "Frontend-разработчик");
        assert_eq!(payload.money, "150000 USD");
        assert_eq!(payload.phone.as_deref(), Some("+7 900 111-22-33"));
        assert_eq!(payload.email.as_deref(), Some("petr@example.com"));
        assert_eq!(payload.birthday_day, Some(1));
        assert_eq!(payload.birthday_month, Some(2));
        assert_eq!(payload.birthday_year, Some(1990));
        assert_eq!(payload.photo, Some(9));
        assert_eq!(payload.company, None);

        assert_eq!(payload.externals.len(), 1);
        let external = &payload.externals[0];
        assert_eq!(external.data.body.as_deref(), Some("Experienced developer"));
        assert_eq!(external.files, vec![FileRef { id: 55 }]);
        assert_eq!(external.auth_type, "NATIVE");
    }

    #[test]
    fn test_candidate_payload_missing_fields_stay_unknown() {
        let upload = ResumeUpload {
            id: 1,
            fields: Some(ParsedFields {
                phones: Some(vec![]),
                ..Default::default()
            }),
            ..Default::default()
        };

        let payload = build_candidate_payload(&sample_row(), &upload, RUBLES).unwrap();
        assert_eq!(payload.phone, None);
        assert_eq!(payload.email, None);
        assert_eq!(payload.birthday_year, None);
        assert_eq!(payload.photo, None);
        assert_eq!(payload.externals[0].data.body, None);

        let bare = ResumeUpload {
            id: 1,
            ..Default::default()
        };
        let payload = build_candidate_payload(&sample_row(), &bare, RUBLES).unwrap();
        assert_eq!(payload.phone, None);
    }

    #[test]
    fn test_candidate_payload_requires_cells() {
        let upload = ResumeUpload::default();
        let mut incomplete = sample_row();
        incomplete.cells[columns::COMPENSATION] = None;

        assert!(matches!(
            build_candidate_payload(&incomplete, &upload, RUBLES),
            Err(RowError::MissingCell {
                column: columns::COMPENSATION,
                ..
            })
        ));
    }

    #[test]
    fn test_link_payload_copies_external_files() {
        let candidate = CandidateRecord {
            id: 100,
            external: vec![FileRef { id: 3 }, FileRef { id: 4 }],
        };

        let payload = build_link_payload(&sample_row(), 10, 20, &candidate).unwrap();
        assert_eq!(payload.vacancy, 10);
        assert_eq!(payload.status, 20);
        assert_eq!(payload.comment, "Strong candidate");
        assert_eq!(payload.files, vec![FileRef { id: 3 }, FileRef { id: 4 }]);
    }

    #[test]
    fn test_link_payload_blank_comment_fails() {
        let candidate = CandidateRecord {
            id: 100,
            external: vec![],
        };
        let blank = row(["Engineer", "Ivanov Petr", "1", "   ", "Interview"]);

        assert!(matches!(
            build_link_payload(&blank, 1, 2, &candidate),
            Err(RowError::MissingComment)
        ));
    }
}
