use std::io;

use sms24x7::{Credentials, MessageText, PushOptions, RawPhoneNumber, SenderName, Sms24x7Client};

fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let email = required_env("SMS24X7_EMAIL")?;
    let password = required_env("SMS24X7_PASSWORD")?;
    let phone_raw = required_env("SMS24X7_PHONE")?;
    let message = std::env::var("SMS24X7_MESSAGE")
        .unwrap_or_else(|_| "Hello from the sms24x7 demo.".to_owned());

    let client = Sms24x7Client::new(Credentials::new(email, password)?);
    let phone = RawPhoneNumber::new(phone_raw)?;
    let text = MessageText::new(message)?;

    let mut options = PushOptions::default().param("satellite_adv", "IF_EXISTS");
    if let Ok(sender) = std::env::var("SMS24X7_SENDER") {
        options = options.sender_name(SenderName::new(sender)?);
    }

    let response = client
        .send_message_with_credentials(phone, text, options)
        .await?;
    println!(
        "n_raw_sms: {}, credits: {}, other: {:?}",
        response.n_raw_sms, response.credits, response.other
    );

    Ok(())
}
