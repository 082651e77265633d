use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::enums::*;
use crate::models::*;

pub fn insert_questionnaire(conn: &Connection, q: &Questionnaire) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO questionnaires (id, name, age, gender, health_condition,
         experienced_symptoms, symptoms, chronic_condition_details, date_created, date_updated)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            q.id.to_string(),
            q.name,
            q.age,
            q.gender.as_str(),
            q.health_condition.as_str(),
            q.experienced_symptoms.as_str(),
            q.symptoms,
            q.chronic_condition_details,
            format_timestamp(&q.date_created),
            format_timestamp(&q.date_updated),
        ],
    )?;
    Ok(())
}

/// Newest first; rows created in the same millisecond keep insertion order.
pub fn list_questionnaires(conn: &Connection) -> Result<Vec<Questionnaire>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, age, gender, health_condition, experienced_symptoms,
         symptoms, chronic_condition_details, date_created, date_updated
         FROM questionnaires ORDER BY date_created DESC, rowid DESC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, u32>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, String>(5)?,
            row.get::<_, Option<String>>(6)?,
            row.get::<_, Option<String>>(7)?,
            row.get::<_, String>(8)?,
            row.get::<_, String>(9)?,
        ))
    })?;

    let mut questionnaires = Vec::new();
    for row in rows {
        let (
            id, name, age, gender, health_condition, experienced_symptoms,
            symptoms, chronic_condition_details, date_created, date_updated,
        ) = row?;
        questionnaires.push(Questionnaire {
            id: Uuid::parse_str(&id)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            name,
            age,
            gender: Gender::from_str(&gender)?,
            health_condition: HealthCondition::from_str(&health_condition)?,
            experienced_symptoms: YesNo::from_str(&experienced_symptoms)?,
            symptoms,
            chronic_condition_details,
            date_created: parse_timestamp(&date_created)?,
            date_updated: parse_timestamp(&date_updated)?,
        });
    }
    Ok(questionnaires)
}

/// Fixed-width UTC form so that text ordering matches time ordering.
pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DatabaseError::ConstraintViolation(format!("bad timestamp {s:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;
    use chrono::TimeZone;

    fn make(name: &str, created: DateTime<Utc>) -> Questionnaire {
        Questionnaire {
            id: Uuid::new_v4(),
            name: name.into(),
            age: 30,
            gender: Gender::Female,
            health_condition: HealthCondition::ChronicIllness,
            experienced_symptoms: YesNo::Yes,
            symptoms: Some("Cough".into()),
            chronic_condition_details: Some("Asthma".into()),
            date_created: created,
            date_updated: created,
        }
    }

    #[test]
    fn insert_and_read_back() {
        let conn = open_memory_database().unwrap();
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let q = make("token-1", ts);
        insert_questionnaire(&conn, &q).unwrap();

        let all = list_questionnaires(&conn).unwrap();
        assert_eq!(all, vec![q]);
    }

    #[test]
    fn absent_text_reads_back_as_none() {
        let conn = open_memory_database().unwrap();
        let mut q = make("token", Utc::now());
        q.health_condition = HealthCondition::Healthy;
        q.experienced_symptoms = YesNo::No;
        q.symptoms = None;
        q.chronic_condition_details = None;
        insert_questionnaire(&conn, &q).unwrap();

        let read = list_questionnaires(&conn).unwrap().remove(0);
        assert_eq!(read.symptoms, None);
        assert_eq!(read.chronic_condition_details, None);
    }

    #[test]
    fn listed_newest_first() {
        let conn = open_memory_database().unwrap();
        let older = make("older", Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let newer = make("newer", Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
        insert_questionnaire(&conn, &older).unwrap();
        insert_questionnaire(&conn, &newer).unwrap();

        let names: Vec<String> = list_questionnaires(&conn)
            .unwrap()
            .into_iter()
            .map(|q| q.name)
            .collect();
        assert_eq!(names, vec!["newer", "older"]);
    }

    #[test]
    fn same_timestamp_keeps_latest_insert_first() {
        let conn = open_memory_database().unwrap();
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        insert_questionnaire(&conn, &make("first", ts)).unwrap();
        insert_questionnaire(&conn, &make("second", ts)).unwrap();

        let all = list_questionnaires(&conn).unwrap();
        assert_eq!(all[0].name, "second");
        assert_eq!(all[1].name, "first");
    }

    #[test]
    fn unknown_enum_in_row_is_an_error() {
        let conn = open_memory_database().unwrap();
        conn.execute_batch("PRAGMA ignore_check_constraints = ON;").unwrap();
        insert_questionnaire(&conn, &make("token", Utc::now())).unwrap();
        conn.execute("UPDATE questionnaires SET gender = 'unknown'", []).unwrap();

        let err = list_questionnaires(&conn).unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidEnum { .. }));
    }

    #[test]
    fn timestamps_are_fixed_width_utc() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "2024-01-15T10:00:00.000Z");
    }
}
