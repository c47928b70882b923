use std::io::Cursor;

use catalogue_tools::accounts::{AccountRow, parse_account_rows};

#[test]
fn header_lines_and_short_rows_are_skipped() {
    let input = "\
id;first name;last name;email\n\
1;Grace;Hopper;Grace.Hopper@Example.COM\n\
malformed line\n\
2;Alan\n\
3; Ada ; Lovelace ; ada@example.com ;extra\n";

    let rows = parse_account_rows(Cursor::new(input)).expect("rows parsed");

    assert_eq!(
        rows,
        vec![
            AccountRow {
                first_name: "Grace".to_string(),
                last_name: "Hopper".to_string(),
                email: "grace.hopper@example.com".to_string(),
            },
            AccountRow {
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: "ada@example.com".to_string(),
            },
        ]
    );
}

#[test]
fn empty_input_yields_no_rows() {
    let rows = parse_account_rows(Cursor::new("")).expect("rows parsed");
    assert!(rows.is_empty());
}
