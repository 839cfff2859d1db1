use ferrous_lookup_application::use_cases::LookupOutcome;
use ferrous_lookup_domain::{Question, ResourceRecord};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize)]
struct LookupReport<'a> {
    question: &'a Question,
    questions: &'a [Question],
    answers: &'a [ResourceRecord],
    authorities: &'a [ResourceRecord],
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> From<&'a LookupOutcome> for LookupReport<'a> {
    fn from(outcome: &'a LookupOutcome) -> Self {
        match &outcome.result {
            Ok(response) => Self {
                question: &outcome.question,
                questions: &response.questions,
                answers: &response.answers,
                authorities: &response.authorities,
                error: None,
            },
            Err(e) => Self {
                question: &outcome.question,
                questions: &e.attempted,
                answers: &[],
                authorities: &[],
                error: Some(e.to_string()),
            },
        }
    }
}

pub fn write_json<W: Write>(out: &mut W, outcomes: &[LookupOutcome]) -> io::Result<()> {
    let reports: Vec<LookupReport<'_>> = outcomes.iter().map(LookupReport::from).collect();
    serde_json::to_writer_pretty(&mut *out, &reports)?;
    writeln!(out)
}

pub fn write_table<W: Write>(out: &mut W, outcomes: &[LookupOutcome]) -> io::Result<()> {
    for outcome in outcomes {
        writeln!(out, ";; {}", outcome.question)?;

        match &outcome.result {
            Ok(response) => {
                if response.answers.is_empty() {
                    writeln!(out, ";; no records found")?;
                }
                write_records(out, &response.answers)?;
                if !response.authorities.is_empty() {
                    writeln!(out, ";; authority")?;
                    write_records(out, &response.authorities)?;
                }
            }
            Err(e) => writeln!(out, ";; error: {}", e)?,
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_records<W: Write>(out: &mut W, records: &[ResourceRecord]) -> io::Result<()> {
    let name_width = records.iter().map(|r| r.name.len()).max().unwrap_or(0);

    for record in records {
        writeln!(
            out,
            "{:<name_width$}  {:>6}  {:<2}  {:<6}  {}  ;; {} in {}ms",
            record.name,
            record.ttl,
            record.class,
            record.record_type,
            record.rdata,
            record.server,
            record.rtt.as_millis(),
            name_width = name_width,
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrous_lookup_domain::{DomainError, LookupError, RecordType, Response};
    use std::sync::Arc;
    use std::time::Duration;

    fn record(name: &str, rdata: &str) -> ResourceRecord {
        ResourceRecord {
            name: name.to_string(),
            record_type: "A".to_string(),
            class: "IN".to_string(),
            ttl: 300,
            rdata: rdata.to_string(),
            server: Arc::from("udp://192.0.2.53:53"),
            rtt: Duration::from_millis(7),
        }
    }

    fn success() -> LookupOutcome {
        let question = Question::new("www", RecordType::A);
        LookupOutcome {
            question: question.clone(),
            result: Ok(Response {
                questions: vec![Question::new("www.example.com.", RecordType::A)],
                answers: vec![record("www.example.com.", "192.0.2.1")],
                authorities: Vec::new(),
            }),
            elapsed: Duration::from_millis(7),
        }
    }

    fn failure() -> LookupOutcome {
        let question = Question::new("down.test.", RecordType::A);
        LookupOutcome {
            question: question.clone(),
            result: Err(LookupError::new(
                DomainError::TransportTimeout {
                    server: "udp://192.0.2.53:53".to_string(),
                },
                vec![question],
            )),
            elapsed: Duration::from_millis(5000),
        }
    }

    #[test]
    fn test_table_lists_answers_with_server_and_rtt() {
        let mut buf = Vec::new();
        write_table(&mut buf, &[success()]).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with(";; www IN A\n"));
        assert!(text.contains("www.example.com."));
        assert!(text.contains("192.0.2.1"));
        assert!(text.contains(";; udp://192.0.2.53:53 in 7ms"));
    }

    #[test]
    fn test_table_reports_errors() {
        let mut buf = Vec::new();
        write_table(&mut buf, &[failure()]).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains(";; error: Transport timeout talking to udp://192.0.2.53:53"));
    }

    #[test]
    fn test_json_includes_error_and_attempts() {
        let mut buf = Vec::new();
        write_json(&mut buf, &[success(), failure()]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value[0]["answers"][0]["rdata"], "192.0.2.1");
        assert!(value[0].get("error").is_none());
        assert_eq!(value[1]["questions"][0]["name"], "down.test.");
        assert!(value[1]["error"].as_str().unwrap().contains("timeout"));
    }
}
