#![no_std]
#![no_main]
#![feature(type_alias_impl_trait)]

mod matrix;
mod usb_manager;

use defmt_rtt as _;
use panic_probe as _;

#[rtic::app(
    device = sparkfun_pro_micro_rp2040::hal::pac,
    dispatchers = [TIMER_IRQ_1]
)]
mod app {
    use crate::matrix::{self, HalfMatrix, MatrixPins};
    use crate::usb_manager::UsbManager;

    use crkbd::action::CustomAction;
    use crkbd::caps_word::CapsWord;
    use crkbd::config::{DEBOUNCE_TICKS, HALF_COLS, INDICATOR_BRIGHTNESS, ROWS, SPLIT_BAUD_RATE};
    use crkbd::indicator::layer_color;
    use crkbd::layout::{self, Layout};
    use crkbd::split::{self, Decoder, Half};

    use keyberon::debounce::Debouncer;
    use keyberon::key_code::{KbHidReport, KeyCode};
    use keyberon::layout::CustomEvent;

    use sparkfun_pro_micro_rp2040::hal::{
        clocks, gpio,
        gpio::pin::bank0::{Gpio0, Gpio1, Gpio25},
        pac,
        pio::{PIOExt, SM0},
        sio::Sio,
        uart::{self, DataBits, StopBits, UartConfig, UartPeripheral},
        usb::UsbBus,
        watchdog::Watchdog,
        Clock,
    };
    use sparkfun_pro_micro_rp2040::XOSC_CRYSTAL_FREQ;
    use usb_device::bus::UsbBusAllocator;
    use ws2812_pio::Ws2812Direct;

    use core::iter::once;
    use fugit::RateExtU32;
    use rtic_monotonics::rp2040::*;

    use smart_leds::{brightness, SmartLedsWrite};

    #[cfg(not(feature = "right-half"))]
    const HALF: Half = Half::Left;
    #[cfg(feature = "right-half")]
    const HALF: Half = Half::Right;

    type SplitUart = UartPeripheral<
        uart::Enabled,
        pac::UART0,
        (
            gpio::Pin<Gpio0, gpio::FunctionUart>,
            gpio::Pin<Gpio1, gpio::FunctionUart>,
        ),
    >;

    type HalfState = [[bool; HALF_COLS]; ROWS];

    #[shared]
    struct Shared {
        usb: UsbManager,
    }

    #[local]
    struct Local {
        matrix: HalfMatrix,
        debouncer: Debouncer<HalfState>,
        layout: Layout,
        caps_word: CapsWord,
        decoder: Decoder,
        uart: SplitUart,
        led: Ws2812Direct<pac::PIO0, SM0, Gpio25>,
    }

    #[init(local = [
        // the USB device and class borrow the allocator for 'static
        usb_bus: Option<UsbBusAllocator<UsbBus>> = None
    ])]
    fn init(mut ctx: init::Context) -> (Shared, Local) {
        let rp2040_timer_token = rtic_monotonics::create_rp2040_monotonic_token!();
        // default rp2040 clock-rate is 125MHz
        Timer::start(ctx.device.TIMER, &mut ctx.device.RESETS, rp2040_timer_token);
        let mut watchdog = Watchdog::new(ctx.device.WATCHDOG);
        let clocks = clocks::init_clocks_and_plls(
            XOSC_CRYSTAL_FREQ,
            ctx.device.XOSC,
            ctx.device.CLOCKS,
            ctx.device.PLL_SYS,
            ctx.device.PLL_USB,
            &mut ctx.device.RESETS,
            &mut watchdog,
        )
        .ok()
        .unwrap();

        let sio = Sio::new(ctx.device.SIO);
        let gpioa = sparkfun_pro_micro_rp2040::Pins::new(
            ctx.device.IO_BANK0,
            ctx.device.PADS_BANK0,
            sio.gpio_bank0,
            &mut ctx.device.RESETS,
        );

        let matrix = matrix::init_matrix(MatrixPins {
            cols: [
                gpioa.adc3.into(),
                gpioa.adc2.into(),
                gpioa.adc1.into(),
                gpioa.adc0.into(),
                gpioa.sck.into(),
            ],
            rows: [
                gpioa.gpio4.into(),
                gpioa.gpio5.into(),
                gpioa.gpio6.into(),
                gpioa.gpio7.into(),
            ],
        })
        .ok()
        .unwrap();
        let debouncer = Debouncer::new(
            [[false; HALF_COLS]; ROWS],
            [[false; HALF_COLS]; ROWS],
            DEBOUNCE_TICKS,
        );

        // TRRS link to the other half
        let uart_pins = (
            gpioa.tx0.into_mode::<gpio::FunctionUart>(),
            gpioa.rx0.into_mode::<gpio::FunctionUart>(),
        );
        let uart = UartPeripheral::new(ctx.device.UART0, uart_pins, &mut ctx.device.RESETS)
            .enable(
                UartConfig::new(SPLIT_BAUD_RATE.Hz(), DataBits::Eight, None, StopBits::One),
                clocks.peripheral_clock.freq(),
            )
            .ok()
            .unwrap();

        let usb_bus = ctx.local.usb_bus.insert(UsbBusAllocator::new(UsbBus::new(
            ctx.device.USBCTRL_REGS,
            ctx.device.USBCTRL_DPRAM,
            clocks.usb_clock,
            true,
            &mut ctx.device.RESETS,
        )));
        let usb = UsbManager::new(usb_bus);

        // layer indicator
        let (mut pio, sm0, _, _, _) = ctx.device.PIO0.split(&mut ctx.device.RESETS);
        let led = Ws2812Direct::new(
            gpioa.led.into_mode(),
            &mut pio,
            sm0,
            clocks.peripheral_clock.freq(),
        );

        defmt::info!("{} half up", HALF);
        tick::spawn().ok();

        (
            Shared { usb },
            Local {
                matrix,
                debouncer,
                layout: layout::layout(),
                caps_word: CapsWord::new(),
                decoder: Decoder::new(),
                uart,
                led,
            },
        )
    }

    #[idle]
    fn idle(_: idle::Context) -> ! {
        loop {
            cortex_m::asm::wfi();
        }
    }

    /// Scan, run the layout and report, once per millisecond.
    #[task(
        local = [matrix, debouncer, layout, caps_word, decoder, uart, led],
        shared = [usb]
    )]
    async fn tick(mut ctx: tick::Context) {
        let mut shown_layer = usize::MAX;
        let mut buf = [0u8; 16];

        loop {
            // the other half
            loop {
                match ctx.local.uart.read_raw(&mut buf) {
                    Ok(0) | Err(nb::Error::WouldBlock) => break,
                    Ok(n) => {
                        for &byte in &buf[..n] {
                            match ctx.local.decoder.push(byte) {
                                Ok(Some(event)) => ctx.local.layout.event(event),
                                Ok(None) => {}
                                Err(e) => defmt::warn!("split link: {}", e),
                            }
                        }
                    }
                    Err(nb::Error::Other(_)) => {
                        defmt::warn!("split link read error");
                        break;
                    }
                }
            }

            // this half
            if let Ok(state) = ctx.local.matrix.get() {
                for event in ctx.local.debouncer.events(state) {
                    let event = HALF.to_global(event);
                    ctx.local.uart.write_full_blocking(&split::ser(event));
                    ctx.local.layout.event(event);
                }
            }

            if let CustomEvent::Press(CustomAction::CapsWordToggle) = ctx.local.layout.tick() {
                ctx.local.caps_word.toggle();
                defmt::info!("caps word: {}", ctx.local.caps_word.is_active());
            }

            let shift = ctx.local.caps_word.tick(ctx.local.layout.keycodes());
            let report: KbHidReport = ctx
                .local
                .layout
                .keycodes()
                .chain(shift.then_some(KeyCode::LShift))
                .collect();
            ctx.shared.usb.lock(|usb| {
                if let Err(e) = usb.send_report(report) {
                    defmt::warn!("usb write: {}", defmt::Debug2Format(&e));
                }
            });

            let layer = ctx.local.layout.current_layer();
            if layer != shown_layer {
                shown_layer = layer;
                defmt::debug!("layer {}", layer);
                ctx.local
                    .led
                    .write(brightness(once(layer_color(layer)), INDICATOR_BRIGHTNESS))
                    .ok();
            }

            Timer::delay(1.millis()).await;
        }
    }

    #[task(binds = USBCTRL_IRQ, priority = 2, shared = [usb])]
    fn usb_rx(mut ctx: usb_rx::Context) {
        ctx.shared.usb.lock(|usb| usb.interrupt());
    }
}
