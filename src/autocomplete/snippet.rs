/// Canned completion, inserted with editor tab stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snippet {
    pub label: &'static str,
    pub insert_text: &'static str,
    /// Grammar literal that must be expected for the snippet to apply.
    pub category: &'static str,
}

pub const SNIPPETS: &[Snippet] = &[
    Snippet {
        label: "SELECT_CASE",
        insert_text: "SELECT\n  CASE\n\tWHEN ${2:CONDITION} THEN \"${3:VAR1}\"\n\tELSE \"${4:VAR2}\"\n  END AS ${5:FIELD1},\n  CASE\n\tWHEN ${6:CONDITION} THEN \"${7:VAR3}\"\n\tELSE \"${8:VAR4}\"\n  END AS ${9:FIELD1}\nFROM\n  ${1:TABLENAME};\n$0",
        category: "select",
    },
    Snippet {
        label: "SELECT_ALL",
        insert_text: "SELECT\n  *\nFROM\n  ${1:TABLENAME};",
        category: "select",
    },
    Snippet {
        label: "S",
        insert_text: "SELECT",
        category: "select",
    },
    Snippet {
        label: "F",
        insert_text: "FROM",
        category: "from",
    },
    Snippet {
        label: "W",
        insert_text: "WHERE",
        category: "where",
    },
    Snippet {
        label: "B",
        insert_text: "BETWEEN ",
        category: "between",
    },
];

pub fn expected_snippets<'a>(literals: &'a [&'a str]) -> impl Iterator<Item = &'static Snippet> + 'a {
    SNIPPETS
        .iter()
        .filter(|snippet| literals.contains(&snippet.category))
}
