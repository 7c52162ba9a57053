use anyhow::Result;
use serde::Serialize;

use crate::models::{Category, Location, LocationSummary, Photo, PhotoPage};
use crate::query::hours::format_operating_hours;

/// Write `value` as a single line of JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer(std::io::stdout(), value)?;
    println!();
    Ok(())
}

/// `id  name (N photos)  description` per category.
pub fn print_categories(categories: &[Category]) -> Result<()> {
    for category in categories {
        println!(
            "{:>3}  {} ({} photos)  {}",
            category.id, category.name, category.photo_count, category.description
        );
    }
    Ok(())
}

/// One line per photo followed by a page footer.
pub fn print_photo_page(page: &PhotoPage, page_number: usize) -> Result<()> {
    for item in &page.items {
        println!("{:>3}  [{}] {}", item.id, item.category_name, item.title);
    }
    println!(
        "page {page_number}: {} of {} photos",
        page.items.len(),
        page.total
    );
    Ok(())
}

pub fn print_photo(photo: &Photo) -> Result<()> {
    println!("{} (#{})", photo.title, photo.id);
    println!("  category : {} (#{})", photo.category_name, photo.category_id);
    println!("  date     : {}", photo.date);
    println!("  image    : {}", photo.full_size_url);
    println!("  thumbnail: {}", photo.thumbnail_url);
    if !photo.description.is_empty() {
        println!("  {}", photo.description);
    }
    Ok(())
}

/// `id  name  open|closed  [distance]` then the address, per location.
pub fn print_locations(locations: &[LocationSummary]) -> Result<()> {
    for location in locations {
        let status = if location.is_open { "open" } else { "closed" };
        let distance = location
            .distance
            .map(|km| format!("  {km:.1} km"))
            .unwrap_or_default();

        println!("{:>3}  {}  {status}{distance}", location.id, location.name);
        println!("     {}", location.address);
    }
    Ok(())
}

pub fn print_location(location: &Location) -> Result<()> {
    println!("{} (#{})", location.name, location.id);
    println!("  {}", location.address);
    println!("  coordinates: {}, {}", location.latitude, location.longitude);

    if !location.phones.is_empty() {
        println!("phones:");
        for phone in &location.phones {
            println!("  {:<10} {}", phone.kind, phone.number);
        }
    }

    println!("hours:");
    for line in format_operating_hours(&location.hours) {
        println!("  {line}");
    }
    for special in &location.hours.special_dates {
        match &special.description {
            Some(description) => {
                println!("  {}: {} ({description})", special.date, special.hours)
            }
            None => println!("  {}: {}", special.date, special.hours),
        }
    }

    print_list("services", location.services.as_deref());
    print_list("landmarks", location.landmarks.as_deref());

    if let Some(parking) = &location.parking {
        let availability = if parking.available {
            "available"
        } else {
            "not available"
        };
        println!("parking: {availability}");
        for detail in [&parking.kind, &parking.price, &parking.notes]
            .into_iter()
            .flatten()
        {
            println!("  {detail}");
        }
    }

    Ok(())
}

fn print_list(label: &str, values: Option<&[String]>) {
    let Some(values) = values.filter(|values| !values.is_empty()) else {
        return;
    };
    println!("{label}: {}", values.join(", "));
}
