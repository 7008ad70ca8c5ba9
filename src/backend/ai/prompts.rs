//! Prompt construction
//!
//! Each AI feature pairs a static system prompt with a user prompt built
//! from the caller's context.

use std::fmt::Write;

use crate::shared::listing::{GenerateDescriptionRequest, Property};
use crate::shared::review::Review;

pub const DESCRIPTION_SYSTEM_PROMPT: &str = "You write rental listings for students. \
Given the facts of a property, write an inviting, honest description of two or three short \
paragraphs. Do not invent facts that were not provided. Plain text only, no headings or markdown.";

pub const REVIEW_SUMMARY_SYSTEM_PROMPT: &str = "You summarize tenant reviews of a rental property \
for prospective students. Write three to five sentences covering what reviewers liked and what \
they complained about. Stay neutral and only use what the reviews say. Plain text only.";

pub const QA_SYSTEM_PROMPT: &str = "You answer a student's question about a rental property on \
behalf of its landlord. Use only the listing details provided. If the answer is not in the \
details, say the landlord will follow up. Reply in at most four sentences, plain text.";

/// Most reviews included in a summary prompt
pub const MAX_REVIEWS_IN_PROMPT: usize = 50;

pub fn description_prompt(request: &GenerateDescriptionRequest) -> String {
    let mut prompt = String::new();
    let _ = writeln!(prompt, "Title: {}", request.title);
    let _ = writeln!(prompt, "Type: {}", request.property_type.as_str());
    let _ = writeln!(prompt, "City: {}", request.city);
    let _ = writeln!(prompt, "Bedrooms: {}", request.bedrooms);
    let _ = writeln!(prompt, "Bathrooms: {}", request.bathrooms);
    let _ = writeln!(prompt, "Monthly rent: {}", request.price);
    if !request.amenities.is_empty() {
        let _ = writeln!(prompt, "Amenities: {}", request.amenities.join(", "));
    }
    if let Some(notes) = request.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        let _ = writeln!(prompt, "Landlord notes: {}", notes.trim());
    }
    prompt
}

pub fn review_summary_prompt(property_title: &str, reviews: &[Review]) -> String {
    let mut prompt = format!("Reviews of \"{}\":\n", property_title);
    for review in reviews.iter().take(MAX_REVIEWS_IN_PROMPT) {
        let _ = writeln!(prompt, "- {}/5: {}", review.rating, review.comment.trim());
    }
    prompt
}

pub fn question_prompt(property: &Property, question: &str) -> String {
    let mut prompt = String::from("Listing details:\n");
    let _ = writeln!(prompt, "Title: {}", property.title);
    let _ = writeln!(prompt, "Type: {}", property.property_type.as_str());
    let _ = writeln!(prompt, "Address: {}, {}", property.address, property.city);
    let _ = writeln!(prompt, "Monthly rent: {}", property.price);
    let _ = writeln!(prompt, "Bedrooms: {}, bathrooms: {}", property.bedrooms, property.bathrooms);
    let _ = writeln!(prompt, "Furnished: {}", if property.furnished { "yes" } else { "no" });
    if let Some(date) = property.available_from {
        let _ = writeln!(prompt, "Available from: {}", date);
    }
    if !property.amenities.is_empty() {
        let _ = writeln!(prompt, "Amenities: {}", property.amenities.join(", "));
    }
    if !property.description.is_empty() {
        let _ = writeln!(prompt, "Description: {}", property.description);
    }
    let _ = write!(prompt, "\nStudent question: {}", question.trim());
    prompt
}
