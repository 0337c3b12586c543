//! Graphics support via embedded-graphics
//!
//! This module implements the
//! [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget) trait for
//! [`Display`], so the embedded-graphics primitives (lines, rectangles,
//! circles, text) can draw into the frame buffer. Call
//! [`Display::flush`] afterwards to put the result on the panel.
//!
//! Pixels are [`BinaryColor`]: `On` is a dark (set) pixel, `Off` clears it.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     prelude::*,
//!     primitives::{Circle, PrimitiveStyle, Rectangle},
//! };
//! use embedded_graphics_core::pixelcolor::BinaryColor;
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::{Operation, SpiDevice};
//! # use pcd8544::{Builder, Dimensions, Display, Interface};
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockPwm;
//! # impl embedded_hal::pwm::ErrorType for MockPwm { type Error = Infallible; }
//! # impl embedded_hal::pwm::SetDutyCycle for MockPwm {
//! #     fn max_duty_cycle(&self) -> u16 { 255 }
//! #     fn set_duty_cycle(&mut self, _duty: u16) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # let interface = Interface::new(MockSpi, MockPin, MockPin);
//! # let dims = match Dimensions::new(84, 48) {
//! #     Ok(dims) => dims,
//! #     Err(_) => return,
//! # };
//! # let config = match Builder::new().dimensions(dims).build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! let mut display = Display::new(interface, MockPwm, config, [0u8; 504]);
//!
//! let _ = Rectangle::new(Point::new(4, 4), Size::new(40, 20))
//!     .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
//!     .draw(&mut display);
//!
//! let _ = Circle::new(Point::new(50, 10), 24)
//!     .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 2))
//!     .draw(&mut display);
//!
//! // Put the frame on the panel
//! if let Err(err) = display.flush() {
//!     let _ = err;
//! }
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::BinaryColor,
    prelude::Pixel,
};
use embedded_hal::pwm::SetDutyCycle;

use crate::display::Display;
use crate::interface::DisplayInterface;

impl<I, BL, B> DrawTarget for Display<I, BL, B>
where
    I: DisplayInterface,
    BL: SetDutyCycle,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let sz = self.size();

        for Pixel(Point { x, y }, color) in pixels {
            if x < 0 || y < 0 {
                continue;
            }

            let x = x as u32;
            let y = y as u32;

            if x >= sz.width || y >= sz.height {
                continue;
            }

            self.set_pixel(x, y, color.is_on());
        }

        Ok(())
    }
}

impl<I, BL, B> OriginDimensions for Display<I, BL, B>
where
    I: DisplayInterface,
    BL: SetDutyCycle,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    fn size(&self) -> Size {
        let dims = self.dimensions();
        Size::new(u32::from(dims.cols), u32::from(dims.rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Builder, Dimensions};
    use alloc::vec;
    use alloc::vec::Vec;
    use embedded_graphics::primitives::{Primitive, PrimitiveStyle, Rectangle};
    use embedded_graphics::Drawable;
    use embedded_hal::delay::DelayNs;

    #[derive(Debug)]
    struct MockInterface;

    impl DisplayInterface for MockInterface {
        type Error = core::convert::Infallible;

        fn send_command(&mut self, _command: u8) -> Result<(), Self::Error> {
            Ok(())
        }

        fn send_data(&mut self, _byte: u8) -> Result<(), Self::Error> {
            Ok(())
        }

        fn reset<D: DelayNs>(&mut self, _delay: &mut D) {}
    }

    #[derive(Debug)]
    struct MockBacklight;

    impl embedded_hal::pwm::ErrorType for MockBacklight {
        type Error = core::convert::Infallible;
    }

    impl SetDutyCycle for MockBacklight {
        fn max_duty_cycle(&self) -> u16 {
            255
        }

        fn set_duty_cycle(&mut self, _duty: u16) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    fn test_display() -> Display<MockInterface, MockBacklight, Vec<u8>> {
        let config = Builder::new()
            .dimensions(Dimensions::new(84, 48).unwrap())
            .build()
            .unwrap();
        Display::new(MockInterface, MockBacklight, config, vec![0u8; 504])
    }

    #[test]
    fn test_size_reports_configured_dimensions() {
        let display = test_display();
        assert_eq!(display.size(), Size::new(84, 48));
    }

    #[test]
    fn test_pixel_maps_to_vertical_packing() {
        let mut display = test_display();

        display
            .draw_iter([Pixel(Point::new(0, 0), BinaryColor::On)])
            .unwrap();
        assert_eq!(display.buffer()[0], 0b0000_0001);

        // y=10 lands in row group 1, bit 2
        display
            .draw_iter([Pixel(Point::new(3, 10), BinaryColor::On)])
            .unwrap();
        assert_eq!(display.buffer()[84 + 3], 0b0000_0100);

        display
            .draw_iter([Pixel(Point::new(3, 10), BinaryColor::Off)])
            .unwrap();
        assert_eq!(display.buffer()[84 + 3], 0x00);
    }

    #[test]
    fn test_out_of_range_pixels_are_ignored() {
        let mut display = test_display();
        display
            .draw_iter([
                Pixel(Point::new(-1, 0), BinaryColor::On),
                Pixel(Point::new(0, -1), BinaryColor::On),
                Pixel(Point::new(84, 0), BinaryColor::On),
                Pixel(Point::new(0, 48), BinaryColor::On),
            ])
            .unwrap();
        assert!(display.buffer().iter().all(|b| *b == 0x00));
    }

    #[test]
    fn test_filled_rectangle_sets_expected_bytes() {
        let mut display = test_display();

        Rectangle::new(Point::new(2, 0), Size::new(3, 8))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut display)
            .unwrap();

        assert_eq!(display.buffer()[1], 0x00);
        assert_eq!(&display.buffer()[2..5], &[0xFF, 0xFF, 0xFF]);
        assert_eq!(display.buffer()[5], 0x00);
    }
}
