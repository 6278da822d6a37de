use weather_core::WeatherResult;

/// Sample readings served by the random-location endpoint.
pub fn random_locations() -> Vec<WeatherResult> {
    [
        ("Sydney", "25°C", "60%"),
        ("Cairo", "30°C", "40%"),
        ("Moscow", "10°C", "75%"),
        ("Beijing", "20°C", "50%"),
        ("Delhi", "35°C", "45%"),
    ]
    .into_iter()
    .map(|(location, temperature, humidity)| WeatherResult {
        location: Some(location.into()),
        temperature: Some(temperature.into()),
        humidity: Some(humidity.into()),
        ..Default::default()
    })
    .collect()
}

pub fn global_average() -> WeatherResult {
    WeatherResult {
        description: Some("Average Global Weather (Placeholder)".into()),
        temperature: Some("19°C".into()),
        humidity: Some("60%".into()),
        ..Default::default()
    }
}
