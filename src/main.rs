// https://docs.esp-rs.org/esp-idf-svc/esp_idf_svc/
#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    firmware::run()
}

#[cfg(not(target_os = "espidf"))]
fn main() -> anyhow::Result<()> {
    anyhow::bail!("epd4in2 drives real hardware, build it for an ESP-IDF target")
}

#[cfg(target_os = "espidf")]
mod firmware {
    use embedded_graphics::mono_font::{iso_8859_15::FONT_10X20, MonoTextStyle};
    use embedded_graphics::pixelcolor::BinaryColor;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
    use embedded_graphics::{prelude::*, text::Text};

    use epd4in2::epd::protocol::PanelProtocol;
    use epd4in2::epd::transport::BusTransport;
    use epd4in2::{Color, Epd4in2, EpdConfig, HalTransport, MonoImage, PanelV2, Pins};

    use esp_idf_svc::hal::delay::Delay;
    use esp_idf_svc::hal::gpio;
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::hal::prelude::*;
    use esp_idf_svc::hal::spi;

    /// Rows per band when wiping the panel in partial mode
    const FILL_BAND_HEIGHT: u32 = 60;

    pub fn run() -> anyhow::Result<()> {
        // It is necessary to call this function once. Otherwise some patches to the runtime
        // implemented by esp-idf-sys might not link properly. See https://github.com/esp-rs/esp-idf-template/issues/71
        esp_idf_svc::sys::link_patches();

        // Bind the log crate to the ESP Logging facilities
        esp_idf_svc::log::EspLogger::initialize_default();

        let peripherals = Peripherals::take()?;
        let pins = peripherals.pins;

        log::info!(
            "Display pins CS {} DC {} RST {} BSY {} SCK {} MOSI {}",
            Pins::CS,
            Pins::DC,
            Pins::RST,
            Pins::BSY,
            Pins::SCK,
            Pins::MOSI
        );

        // Chip select is driven by the driver, so the bus is used without a device
        let spi_driver = spi::SpiDriver::new(
            peripherals.spi2,
            pins.gpio12,                    // Pins::SCK
            pins.gpio11,                    // Pins::MOSI
            Option::<gpio::AnyIOPin>::None, // No MISO needed for display
            &spi::SpiDriverConfig::new(),
        )?;
        let bus = spi::SpiBusDriver::new(spi_driver, &spi::SpiConfig::new().baudrate(4.MHz().into()))?;

        log::info!("Enabling display power (pin {})", Pins::POWER);
        let mut power_pin = gpio::PinDriver::output(pins.gpio7)?;
        power_pin.set_high()?;

        let delay = Delay::default();
        delay.delay_ms(100); // Wait for power to stabilize

        let transport = HalTransport::new(
            bus,
            gpio::PinDriver::output(pins.gpio45)?, // Pins::CS
            gpio::PinDriver::output(pins.gpio46)?, // Pins::DC
            gpio::PinDriver::output(pins.gpio47)?, // Pins::RST
            gpio::PinDriver::input(pins.gpio48)?,  // Pins::BSY
            delay,
        );

        let config = EpdConfig::default().with_full_refresh_every(10);
        let mut epd = Epd4in2::new(PanelV2::new(), transport, config)
            .map_err(|e| anyhow::anyhow!("Could not create EPD driver: {}", e))?;

        show_banner(&mut epd).map_err(|e| {
            log::error!("Display sequence failed: {}", e);
            anyhow::anyhow!("Display sequence failed: {}", e)
        })?;

        log::info!("Done, panel is asleep");
        Ok(())
    }

    fn show_banner<P, T>(epd: &mut Epd4in2<P, T>) -> Result<(), epd4in2::EpdError>
    where
        P: PanelProtocol,
        T: BusTransport,
    {
        log::info!("Initialising in partial mode");
        epd.init(true, false)?;
        epd.clear()?;

        log::info!("Wiping panel in bands of {} rows", FILL_BAND_HEIGHT);
        epd.fill(Color::White, FILL_BAND_HEIGHT)?;

        let banner = render_banner("epd4in2", epd.width());
        epd.draw(0, 120, &banner)?;

        log::info!("Entering deep sleep");
        epd.sleep()
    }

    fn render_banner(text: &str, width: u32) -> MonoImage {
        let mut image = MonoImage::new(width, 48, Color::White);
        let style = MonoTextStyle::new(&FONT_10X20, BinaryColor::On);

        // MonoImage never fails to draw
        let _ = Rectangle::new(Point::new(4, 4), Size::new(width - 8, 40))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 2))
            .draw(&mut image);
        let _ = Text::new(text, Point::new(16, 30), style).draw(&mut image);
        image
    }
}
