use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::CompanySigner;

/// Parse a company-signer directory export (`Signer ID,Name,Title[,Email]`).
pub(crate) fn parse_company_signers<R: Read>(reader: R) -> Result<Vec<CompanySigner>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut signers = Vec::new();

    for record in csv_reader.deserialize::<DirectoryRow>() {
        let row = record?;
        if row.id.is_empty() || row.name.is_empty() {
            continue;
        }
        if signers.iter().any(|existing: &CompanySigner| existing.id == row.id) {
            continue;
        }

        signers.push(CompanySigner {
            id: row.id,
            name: row.name,
            title: row.title,
            email: row.email,
        });
    }

    Ok(signers)
}

#[derive(Debug, Deserialize)]
struct DirectoryRow {
    #[serde(rename = "Signer ID")]
    id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Email", default, deserialize_with = "empty_string_as_none")]
    email: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_blank_and_duplicate_rows() {
        let csv = "Signer ID,Name,Title,Email\n\
                   cs-hr,Dana Ortiz,HR Director,dana@example.com\n\
                   ,Nameless,Clerk,\n\
                   cs-hr,Dana Again,HR Director,\n\
                   cs-ops,Lee Park,Operations Manager,\n";
        let signers = parse_company_signers(csv.as_bytes()).expect("csv parses");

        assert_eq!(signers.len(), 2);
        assert_eq!(signers[0].name, "Dana Ortiz");
        assert_eq!(signers[0].email.as_deref(), Some("dana@example.com"));
        assert_eq!(signers[1].id, "cs-ops");
        assert!(signers[1].email.is_none());
    }

    #[test]
    fn email_column_is_optional() {
        let csv = "Signer ID,Name,Title\ncs-1,Robin Hale,Controller\n";
        let signers = parse_company_signers(csv.as_bytes()).expect("csv parses");
        assert_eq!(signers.len(), 1);
        assert!(signers[0].email.is_none());
    }
}
