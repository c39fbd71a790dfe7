use crate::app::list::ListController;
use crate::cpf;

/// Recompute `visible` from `records` and `query`, resetting the selection
/// when it falls outside the result.
///
/// Matches case-insensitively on name, email, phone and CPF. A query made
/// only of digits and CPF punctuation also matches the CPF by digits alone,
/// so `111222` finds `111.222.333-44` and `55566677788` finds a masked one.
pub fn apply_search(list: &mut ListController) {
    let q = list.query.trim().to_lowercase();
    if q.is_empty() {
        list.visible = list.records.clone();
    } else {
        let cpf_like = q.chars().all(|c| c.is_ascii_digit() || ".- ".contains(c));
        let q_digits = if cpf_like {
            cpf::digits_only(&q)
        } else {
            String::new()
        };
        list.visible = list
            .records
            .iter()
            .filter(|r| {
                r.name.to_lowercase().contains(&q)
                    || r.email.to_lowercase().contains(&q)
                    || r.phone.to_lowercase().contains(&q)
                    || r.cpf.to_lowercase().contains(&q)
                    || (!q_digits.is_empty() && cpf::digits_only(&r.cpf).contains(&q_digits))
            })
            .cloned()
            .collect();
    }
    if list.selected >= list.visible.len() {
        list.selected = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Record;

    fn mk(id: &str, name: &str, email: &str, cpf: &str) -> Record {
        Record {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            phone: "5511999990000".to_string(),
            cpf: cpf.to_string(),
        }
    }

    fn mk_list() -> ListController {
        let records = vec![
            mk("1", "Alice Souza", "alice@example.com", "11122233344"),
            mk("2", "Bob Lima", "bob@example.com", "555.666.777-88"),
        ];
        ListController {
            visible: records.clone(),
            records,
            ..ListController::default()
        }
    }

    #[test]
    fn search_matches_name_case_insensitively() {
        let mut list = mk_list();
        list.query = "bOb".to_string();
        apply_search(&mut list);
        assert_eq!(list.visible.len(), 1);
        assert_eq!(list.visible[0].id, "2");
    }

    #[test]
    fn search_matches_cpf_masked_or_digits() {
        let mut list = mk_list();
        list.query = "111.222".to_string();
        apply_search(&mut list);
        assert_eq!(list.visible.len(), 1);
        assert_eq!(list.visible[0].id, "1");

        list.query = "555666".to_string();
        apply_search(&mut list);
        assert_eq!(list.visible.len(), 1);
        assert_eq!(list.visible[0].id, "2");
    }

    #[test]
    fn mixed_letters_and_digits_do_not_match_by_cpf_digits() {
        let mut list = mk_list();
        list.query = "bob2".to_string();
        apply_search(&mut list);
        assert!(list.visible.is_empty());

        list.query = "alice@".to_string();
        apply_search(&mut list);
        assert_eq!(list.visible.len(), 1);
        assert_eq!(list.visible[0].id, "1");
    }

    #[test]
    fn digit_query_finds_masked_cpf() {
        let mut list = mk_list();
        list.query = "55566677788".to_string();
        apply_search(&mut list);
        assert_eq!(list.visible.len(), 1);
        assert_eq!(list.visible[0].id, "2");

        for query in ["111-222", "111 222"] {
            list.query = query.to_string();
            apply_search(&mut list);
            assert_eq!(list.visible.len(), 1, "query {query:?}");
            assert_eq!(list.visible[0].id, "1");
        }
    }

    #[test]
    fn empty_query_restores_everything_and_selection_is_clamped() {
        let mut list = mk_list();
        list.selected = 1;
        list.query = "alice".to_string();
        apply_search(&mut list);
        assert_eq!(list.selected, 0);
        list.query.clear();
        apply_search(&mut list);
        assert_eq!(list.visible.len(), 2);
    }
}
