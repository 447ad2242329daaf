//! Basic Gemini client usage example
//!
//! Run with: cargo run -p gemini-client --example basic -- path/to/sheet.pdf

use gemini_client::{Content, GeminiClient, GenerateContentRequest, Part};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = GeminiClient::from_env()?;

    // Text-only generation
    println!("=== Text ===");
    let text = client
        .generate_text(
            "gemini-2.0-flash",
            GenerateContentRequest::new()
                .content(Content::user(vec![Part::text("What is Rust in one sentence?")]))
                .temperature(0.7),
        )
        .await?;
    println!("Response: {}", text);

    // Document question
    if let Some(path) = std::env::args().nth(1) {
        println!("\n=== Document ===");
        let file = client.upload_file(&path, "application/pdf").await?;
        println!("Uploaded {} as {}", path, file.name);

        let text = client
            .generate_text(
                "gemini-2.0-flash",
                GenerateContentRequest::new().content(Content::user(vec![
                    Part::text("Give the document's title."),
                    Part::file(&file),
                ])),
            )
            .await?;
        println!("Response: {}", text);

        client.delete_file(&file.name).await?;
    }

    Ok(())
}
