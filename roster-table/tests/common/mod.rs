#![allow(dead_code)]

use roster_table::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: &'static str,
    pub groups: Vec<i64>,
}

impl Person {
    pub fn new(id: &str, name: &str, role: &'static str, groups: &[i64]) -> Self {
        let email = format!("{}@school.test", name.to_lowercase().replace(' ', "."));
        Self {
            id: id.to_string(),
            name: name.to_string(),
            email,
            role,
            groups: groups.to_vec(),
        }
    }
}

impl TableRow for Person {
    type Id = i64;

    fn id(&self) -> String {
        self.id.clone()
    }

    fn native_id(&self) -> Option<i64> {
        self.id.trim().parse().ok()
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.email]
    }
}

pub fn columns() -> Vec<Column<Person>> {
    vec![
        Column::new("id", "ID", 4, |p: &Person| p.id.clone().into()).align(Alignment::Right),
        Column::new("name", "Name", 12, |p: &Person| p.name.clone().into()).sortable(),
        Column::new("email", "Email", 24, |p: &Person| p.email.clone().into()).sortable(),
        Column::new("role", "Role", 8, |p: &Person| p.role.into())
            .sortable()
            .filter(FilterStrategy::Equals),
        Column::new("groups", "Groups", 10, |p: &Person| {
            CellValue::List(p.groups.iter().map(|g| g.to_string()).collect())
        })
        .filter(FilterStrategy::Intersects),
    ]
}

/// Two rows: 1 is a student in group 10, 2 a teacher in group 20.
pub fn two_rows() -> Table<Person> {
    Table::with_rows(
        columns(),
        vec![
            Person::new("1", "Ada Lovelace", "STUDENT", &[10]),
            Person::new("2", "Bob Stone", "TEACHER", &[20]),
        ],
    )
}

pub fn roster() -> Table<Person> {
    Table::with_rows(
        columns(),
        vec![
            Person::new("3", "carol white", "STUDENT", &[10, 20]),
            Person::new("1", "Ada Lovelace", "STUDENT", &[10]),
            Person::new("4", "Dan Brown", "ADMIN", &[]),
            Person::new("2", "Bob Stone", "TEACHER", &[20, 30]),
            Person::new("12", "Eve Adams", "TEACHER", &[30]),
        ],
    )
}

pub fn ids(rows: &[Person]) -> Vec<&str> {
    rows.iter().map(|p| p.id.as_str()).collect()
}
