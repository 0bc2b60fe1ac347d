//! Ordered candidate header fragments per role.

use serde::{Deserialize, Serialize};
use wpr_model::FieldRole;

/// Candidate header names for each role, most specific first.
///
/// Order matters: within each matching phase the first candidate that hits
/// wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Candidates {
    pub date: Vec<String>,
    pub collaborator: Vec<String>,
    pub count: Vec<String>,
    #[serde(rename = "type")]
    pub kind: Vec<String>,
    pub locality: Vec<String>,
    pub demand: Vec<String>,
}

impl Default for Candidates {
    fn default() -> Self {
        Self {
            date: strings(&["DATA", "DT", "DIA"]),
            collaborator: strings(&[
                "COLABORADOR",
                "NOME",
                "RESPONSAVEL",
                "RESPONSÁVEL",
                "TECNICO",
                "TÉCNICO",
            ]),
            count: strings(&[
                "NOTAS ATENDIDAS",
                "QTD NOTAS",
                "QUANTIDADE",
                "QTD",
                "NOTAS",
                "NOTA",
            ]),
            kind: strings(&["TIPO DE NOTA", "TIPO NOTA", "TIPO"]),
            locality: strings(&["LOCALIDADE", "LOCAL", "CIDADE"]),
            demand: strings(&["DEMANDA", "APOIO", "SUPORTE"]),
        }
    }
}

impl Candidates {
    pub fn for_role(&self, role: FieldRole) -> &[String] {
        match role {
            FieldRole::Date => &self.date,
            FieldRole::Collaborator => &self.collaborator,
            FieldRole::Count => &self.count,
            FieldRole::Type => &self.kind,
            FieldRole::Locality => &self.locality,
            FieldRole::Demand => &self.demand,
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let parsed: Candidates = toml::from_str("count = [\"PRODUCAO\"]\n").unwrap();
        assert_eq!(parsed.count, vec!["PRODUCAO"]);
        assert_eq!(parsed.date, Candidates::default().date);
    }

    #[test]
    fn type_key_maps_to_kind() {
        let parsed: Candidates = toml::from_str("type = [\"CATEGORIA\"]\n").unwrap();
        assert_eq!(parsed.for_role(FieldRole::Type), ["CATEGORIA".to_string()]);
    }
}
