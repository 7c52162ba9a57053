//! Built-in site data used when no data file is configured.

use crate::models::{Category, Location, ParkingInfo, Phone, Photo, WeeklyHours};
use crate::store::SiteData;

/// Seed collections for the Ale Massas site.
pub fn site_data() -> SiteData {
    SiteData {
        categories: categories(),
        photos: photos(),
        locations: locations(),
    }
}

fn category(id: u32, name: &str, description: &str, photo_count: u32) -> Category {
    Category {
        id,
        name: name.to_string(),
        description: description.to_string(),
        photo_count,
    }
}

fn categories() -> Vec<Category> {
    vec![
        category(1, "Ambiente", "Fotos do ambiente acolhedor do restaurante", 12),
        category(2, "Pratos", "Deliciosas massas e pratos italianos", 25),
        category(3, "Eventos", "Momentos especiais e celebrações", 18),
        category(4, "Equipe", "Nossa equipe dedicada", 8),
    ]
}

fn photo(
    id: u32,
    slug: &str,
    title: &str,
    description: &str,
    date: &str,
    (category_id, category_name): (u32, &str),
) -> Photo {
    Photo {
        id,
        thumbnail_url: format!("/images/gallery/{slug}-thumb.jpg"),
        full_size_url: format!("/images/gallery/{slug}-full.jpg"),
        title: title.to_string(),
        description: description.to_string(),
        date: date.to_string(),
        category_id,
        category_name: category_name.to_string(),
    }
}

fn photos() -> Vec<Photo> {
    const AMBIENTE: (u32, &str) = (1, "Ambiente");
    const PRATOS: (u32, &str) = (2, "Pratos");
    const EVENTOS: (u32, &str) = (3, "Eventos");
    const EQUIPE: (u32, &str) = (4, "Equipe");

    vec![
        photo(
            1,
            "ambiente-1",
            "Salão Principal",
            "Nosso acolhedor salão principal com decoração italiana",
            "2024-01-15",
            AMBIENTE,
        ),
        photo(
            2,
            "pratos-1",
            "Fettuccine Alfredo",
            "Clássico fettuccine ao molho alfredo",
            "2024-01-20",
            PRATOS,
        ),
        photo(
            3,
            "eventos-1",
            "Jantar Especial",
            "Celebração de aniversário no restaurante",
            "2024-02-10",
            EVENTOS,
        ),
        photo(
            4,
            "equipe-1",
            "Chef Alessandro",
            "Nosso chef principal preparando massas frescas",
            "2024-01-10",
            EQUIPE,
        ),
        photo(
            5,
            "ambiente-2",
            "Área Externa",
            "Terraço com vista para o jardim",
            "2024-01-18",
            AMBIENTE,
        ),
        photo(
            6,
            "pratos-2",
            "Lasanha Bolonhesa",
            "Tradicional lasanha com molho bolonhesa",
            "2024-01-25",
            PRATOS,
        ),
    ]
}

fn phone(kind: &str, number: &str) -> Phone {
    Phone {
        kind: kind.to_string(),
        number: number.to_string(),
    }
}

fn strings(values: &[&str]) -> Option<Vec<String>> {
    Some(values.iter().map(|v| v.to_string()).collect())
}

/// Same window Monday to Thursday, then Friday/Saturday and Sunday.
fn weekly(weekdays: &str, weekend: &str, sunday: &str) -> WeeklyHours {
    WeeklyHours {
        monday: Some(weekdays.to_string()),
        tuesday: Some(weekdays.to_string()),
        wednesday: Some(weekdays.to_string()),
        thursday: Some(weekdays.to_string()),
        friday: Some(weekend.to_string()),
        saturday: Some(weekend.to_string()),
        sunday: Some(sunday.to_string()),
        special_dates: Vec::new(),
    }
}

fn locations() -> Vec<Location> {
    vec![
        Location {
            id: 1,
            name: "Ale Massas - Jardins".to_string(),
            address: "Rua Augusta, 1234 - Jardins, São Paulo - SP, 01304-001".to_string(),
            phones: vec![
                phone("principal", "(11) 3456-7890"),
                phone("delivery", "(11) 3456-7891"),
            ],
            hours: weekly("11:00 - 23:00", "11:00 - 00:00", "11:00 - 22:00"),
            latitude: -23.561684,
            longitude: -46.656139,
            photos: Some(Vec::new()),
            services: strings(&["Estacionamento", "Wi-Fi", "Área Kids"]),
            landmarks: strings(&["Próximo ao Parque Trianon", "Avenida Paulista"]),
            parking: Some(ParkingInfo {
                available: true,
                kind: Some("Conveniado".to_string()),
                price: Some("R$ 15,00 por 2 horas".to_string()),
                notes: Some("Validação no restaurante".to_string()),
            }),
        },
        Location {
            id: 2,
            name: "Ale Massas - Vila Madalena".to_string(),
            address: "Rua Harmonia, 567 - Vila Madalena, São Paulo - SP, 05435-000".to_string(),
            phones: vec![
                phone("principal", "(11) 3456-7892"),
                phone("delivery", "(11) 3456-7893"),
            ],
            hours: weekly("11:00 - 23:00", "11:00 - 01:00", "11:00 - 22:00"),
            latitude: -23.546389,
            longitude: -46.691944,
            photos: Some(Vec::new()),
            services: strings(&["Wi-Fi", "Área Externa"]),
            landmarks: strings(&["Próximo ao Beco do Batman", "Rua Aspicuelta"]),
            parking: Some(ParkingInfo {
                available: false,
                kind: None,
                price: None,
                notes: Some("Estacionamento público nas proximidades".to_string()),
            }),
        },
    ]
}
