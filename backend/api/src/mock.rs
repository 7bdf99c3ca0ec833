//! Mock directory contents used until a persistence layer exists

use shared::models::DrivingSchoolInput;

/// (name, location, phone, email, address, description, instructors, students)
const MOCK_SCHOOLS: &[(&str, &str, &str, &str, &str, Option<&str>, &str, &str)] = &[
    (
        "Auto Escola Praia",
        "Praia",
        "+238 261 1234",
        "geral@autoescolapraia.cv",
        "Avenida Amílcar Cabral 12, Plateau",
        Some("Cursos de categoria A e B com aulas práticas diárias"),
        "8",
        "160",
    ),
    (
        "Escola de Condução Mindelo",
        "Mindelo",
        "+238 231 4567",
        "contacto@conducaomindelo.cv",
        "Rua de Lisboa 45, Mindelo",
        Some("Formação de condutores em São Vicente desde 1998"),
        "6",
        "110",
    ),
    (
        "Auto Escola Sal",
        "Santa Maria",
        "242-1890",
        "info@autoescolasal.cv",
        "Rua 1 de Junho 7, Santa Maria",
        None,
        "3",
        "45",
    ),
    (
        "Escola de Condução Santiago Norte",
        "Assomada",
        "265 3321",
        "secretaria@santiagonorte.cv",
        "Largo do Mercado, Assomada",
        Some("Aulas teóricas à noite para trabalhadores"),
        "4",
        "70",
    ),
    (
        "Auto Escola Fogo",
        "São Filipe",
        "+238 281 2200",
        "fogo@autoescola.cv",
        "Avenida Principal, São Filipe",
        Some("   "),
        "2",
        "25",
    ),
];

pub fn mock_schools() -> Vec<DrivingSchoolInput> {
    MOCK_SCHOOLS
        .iter()
        .map(
            |&(name, location, phone, email, address, description, instructors, students)| {
                DrivingSchoolInput {
                    name: name.to_string(),
                    location: location.to_string(),
                    phone_number: phone.to_string(),
                    email: email.to_string(),
                    address: address.to_string(),
                    description: description.map(str::to_string),
                    instructor_capacity: instructors.to_string(),
                    student_capacity: students.to_string(),
                }
            },
        )
        .collect()
}
