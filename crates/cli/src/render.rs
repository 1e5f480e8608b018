//! Command output on stdout.

#![allow(clippy::print_stdout)]

use chrono::Local;

use queuemate_client::{QueueSnapshot, Route, Session, StatusFilter};
use queuemate_core::{Barber, QueueEntry, QueueStats, Shop};

pub fn line(text: &str) {
    println!("{text}");
}

pub fn session(session: &Session, route: Route) {
    println!("Status:  {route}");
    if let Some(email) = session.user_email() {
        println!("Email:   {email}");
    }
    if let Some(user_id) = session.user_id() {
        println!("User:    {user_id}");
    }
    if let Some(shop_id) = session.shop_id() {
        println!("Shop:    {shop_id}");
    }
    if let Some(expires_at) = session.token().and_then(queuemate_client::Credential::expires_at) {
        println!("Expires: {}", expires_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"));
    }
}

pub fn shop(shop: &Shop, public_link: Option<&str>) {
    println!("{} [{}]", shop.name, shop.status());
    if let Some(location) = shop.location.as_deref() {
        println!("  Location: {location}");
    }
    if let Some(phone) = shop.phone.as_deref() {
        println!("  Phone:    {phone}");
    }
    if let Some(hours) = shop.hours.as_deref() {
        println!("  Hours:    {hours}");
    }
    if let Some(link) = public_link {
        println!("  Link:     {link}");
    }
}

pub fn stats(stats: QueueStats) {
    println!(
        "Today: {} total, {} waiting, {} completed",
        stats.total, stats.waiting, stats.completed
    );
}

pub fn queue(entries: &[QueueEntry]) {
    if entries.is_empty() {
        println!("No customers in the queue.");
        return;
    }

    for (position, entry) in entries.iter().enumerate() {
        let barber = entry.barber.name().unwrap_or("Any barber");
        println!(
            "{:>3}. {:<20} {:<16} ({} min) with {barber}, joined {} [{}]",
            position + 1,
            entry.name,
            entry.service_name,
            entry.service_duration,
            entry.created_at.with_timezone(&Local).format("%H:%M"),
            entry.status,
        );
    }
}

pub fn snapshot(snapshot: &QueueSnapshot) {
    if let Some(at) = snapshot.fetched_at {
        println!("-- {} --", at.with_timezone(&Local).format("%H:%M:%S"));
    }
    stats(snapshot.stats);
    queue(&snapshot.entries);
}

pub fn roster(barbers: &[&Barber], counts: &[(StatusFilter, usize)]) {
    let tabs: Vec<String> = counts
        .iter()
        .map(|(filter, count)| format!("{filter} ({count})"))
        .collect();
    println!("{}", tabs.join("  "));

    if barbers.is_empty() {
        println!("No team members found.");
        return;
    }

    for barber in barbers {
        let services: Vec<String> = barber
            .services
            .iter()
            .map(|service| format!("{} {}m", service.name, service.duration))
            .collect();
        println!(
            "{}  {:<20} {:<10} avg {} min  {}",
            barber.id,
            barber.name,
            barber.status,
            barber.avg_duration,
            services.join(", ")
        );
        if let Some(code) = barber.access_code.as_deref() {
            println!("    access code: {code}");
        }
    }
}
