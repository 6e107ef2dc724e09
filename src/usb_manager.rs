use crkbd::config::{USB_MANUFACTURER, USB_PID, USB_PRODUCT, USB_VID};
use crkbd::report::ReportQueue;
use keyberon::key_code::KbHidReport;
use sparkfun_pro_micro_rp2040::hal;
use usb_device::UsbError;
use usb_device::{
    bus::UsbBusAllocator,
    device::{UsbDevice, UsbDeviceBuilder, UsbDeviceState, UsbVidPid},
};

type KeyboardClass = keyberon::Class<'static, hal::usb::UsbBus, ()>;

/// The HID keyboard the host sees.
pub struct UsbManager {
    device: UsbDevice<'static, hal::usb::UsbBus>,
    keyboard: KeyboardClass,
    reports: ReportQueue,
}

impl UsbManager {
    pub fn new(usb_bus: &'static UsbBusAllocator<hal::usb::UsbBus>) -> Self {
        let keyboard = keyberon::new_class(usb_bus, ());
        let device = UsbDeviceBuilder::new(usb_bus, UsbVidPid(USB_VID, USB_PID))
            .manufacturer(USB_MANUFACTURER)
            .product(USB_PRODUCT)
            .serial_number(env!("CARGO_PKG_VERSION"))
            .build();
        UsbManager {
            device,
            keyboard,
            reports: ReportQueue::new(),
        }
    }

    /// Runs from the USB interrupt.
    pub fn interrupt(&mut self) {
        if self.device.poll(&mut [&mut self.keyboard]) {
            self.keyboard.poll();
        }
    }

    pub fn is_configured(&self) -> bool {
        self.device.state() == UsbDeviceState::Configured
    }

    /// Queues `report` when it differs from the previous one and writes
    /// whatever the endpoint accepts.
    ///
    /// Nothing is sent until the host configured the device, which is how
    /// the half without a cable stays quiet. A busy endpoint is not an
    /// error, the queued reports go out on a later tick.
    pub fn send_report(&mut self, report: KbHidReport) -> Result<(), UsbError> {
        if !self.is_configured() {
            self.reports.clear();
            return Ok(());
        }
        self.reports.push(report);
        let keyboard = &mut self.keyboard;
        let written = self.reports.flush(|report| {
            let n = keyboard.write(report.as_bytes())?;
            if n > 0 {
                keyboard.device_mut().set_keyboard_report(report.clone());
            }
            Ok(n)
        });
        match written {
            Err(UsbError::WouldBlock) => Ok(()),
            written => written,
        }
    }
}
