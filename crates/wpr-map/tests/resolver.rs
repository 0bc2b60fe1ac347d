use proptest::prelude::*;
use wpr_map::{
    Candidates, MappingError, MappingStrategy, MatchKind, PositionalLayout, match_role, resolve,
};
use wpr_model::FieldRole;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

#[test]
fn data_atendimento_resolves_exactly() {
    let headers = strings(&["Data Atendimento", "Colaborador", "Notas Atendidas"]);
    let candidates = Candidates {
        date: strings(&["DATA", "DATA ATENDIMENTO"]),
        ..Candidates::default()
    };

    let mapping = resolve(&headers, &MappingStrategy::ByName(candidates.clone())).unwrap();
    assert_eq!(mapping.date.index, 0);
    assert_eq!(mapping.date.name, "Data Atendimento");

    let found = match_role(&headers, &candidates.date).unwrap();
    assert_eq!(found.kind, MatchKind::Exact);
}

#[test]
fn missing_count_column_names_candidates_and_hint() {
    let headers = strings(&["Data", "Colaborador", "Qtde Nota"]);
    let candidates = Candidates {
        count: strings(&["QUANTIDADE NOTAS"]),
        ..Candidates::default()
    };
    let err = resolve(&headers, &MappingStrategy::ByName(candidates)).unwrap_err();
    let MappingError::ColumnNotFound {
        role,
        candidates,
        suggestion,
    } = err
    else {
        panic!("expected ColumnNotFound");
    };
    assert_eq!(role, FieldRole::Count);
    assert_eq!(candidates, vec!["QUANTIDADE NOTAS"]);
    assert_eq!(suggestion.as_deref(), Some("Qtde Nota"));
}

#[test]
fn positional_strategy_ignores_names() {
    let headers = strings(&["a", "b", "c", "d"]);
    let layout = PositionalLayout::from_letters("D", "A", "B").unwrap();
    let mapping = resolve(&headers, &MappingStrategy::Positional(layout)).unwrap();
    assert_eq!(mapping.date.name, "d");
    assert_eq!(mapping.collaborator.name, "a");
    assert_eq!(mapping.count.name, "b");
}

#[test]
fn strategy_reads_from_toml() {
    let strategy: MappingStrategy = toml::from_str(
        "strategy = \"positional\"\ndate = 0\ncollaborator = 1\ncount = 3\ntype = 2\n",
    )
    .unwrap();
    let MappingStrategy::Positional(layout) = strategy else {
        panic!("expected positional layout");
    };
    assert_eq!(layout.count, 3);
    assert_eq!(layout.kind, Some(2));
}

proptest! {
    /// An exact header wins over any header that merely contains a candidate,
    /// wherever the two sit in the table and in the candidate list.
    #[test]
    fn exact_match_beats_substring(
        prefix in "[A-Z]{1,6}",
        exact_first in any::<bool>(),
        candidate_exact_first in any::<bool>(),
    ) {
        let fragment = "NOTAS".to_string();
        let exact = format!("{prefix} QTD");
        let containing = format!("{prefix} NOTAS DIA");

        let headers = if exact_first {
            vec![exact.clone(), containing]
        } else {
            vec![containing, exact.clone()]
        };
        let candidates = if candidate_exact_first {
            vec![exact.clone(), fragment]
        } else {
            vec![fragment, exact.clone()]
        };

        let found = match_role(&headers, &candidates).unwrap();
        prop_assert_eq!(found.kind, MatchKind::Exact);
        prop_assert_eq!(found.column.name, exact);
    }
}
