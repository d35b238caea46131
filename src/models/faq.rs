use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    #[serde(default)]
    pub id: i64,
    pub question: String,
    #[serde(default)]
    pub question_mm: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub answer_mm: String,
}

pub fn create(conn: &Connection, course_id: i64, faq: &Faq, sort_order: i64) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO faqs (course_id, question, question_mm, answer, answer_mm, sort_order) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![course_id, faq.question, faq.question_mm, faq.answer, faq.answer_mm, sort_order],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_for_course(conn: &Connection, course_id: i64) -> rusqlite::Result<Vec<Faq>> {
    let mut stmt = conn.prepare(
        "SELECT id, question, question_mm, answer, answer_mm \
         FROM faqs WHERE course_id = ?1 ORDER BY sort_order, id",
    )?;
    let faqs = stmt
        .query_map(params![course_id], |row| {
            Ok(Faq {
                id: row.get("id")?,
                question: row.get("question")?,
                question_mm: row.get("question_mm")?,
                answer: row.get("answer")?,
                answer_mm: row.get("answer_mm")?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(faqs)
}

/// Replace all FAQs for a course with a new ordered set.
pub fn replace_for_course(conn: &Connection, course_id: i64, faqs: &[Faq]) -> rusqlite::Result<()> {
    conn.execute("DELETE FROM faqs WHERE course_id = ?1", params![course_id])?;
    for (i, faq) in faqs.iter().enumerate() {
        create(conn, course_id, faq, i as i64)?;
    }
    Ok(())
}
