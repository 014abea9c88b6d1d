//! evdev/uinput front end: grabs a physical device exclusively and
//! mirrors the transformed stream onto a virtual uinput device, the same
//! pairing `virtual_dev.rs`/`monitor.rs` set up for the teacher's own
//! runtime, generalized from `EV_KEY`-only to every event kind the core
//! passes through (`EV_SYN`, `EV_REL`, `EV_MSC` in addition to `EV_KEY`).

use std::fs::File;
use std::os::unix::io::{AsRawFd, FromRawFd};
use std::time::{SystemTime, UNIX_EPOCH};

use evdev_rs::enums::{int_to_ev_key, EventCode, EventType, EV_MSC, EV_REL, EV_SYN};
use evdev_rs::{Device, DeviceWrapper, InputEvent, ReadFlag, TimeVal, UInputDevice, UninitDevice};

use layerz_core::{Event, EventProvider};
use layerz_keys::{EV_KEY as KIND_KEY, EV_MSC as KIND_MSC, EV_REL as KIND_REL, EV_SYN as KIND_SYN};

use crate::error::{Error, Result};

const EVIOCGRAB: libc::c_ulong = 1074021776;

pub fn open_dev(path: &str) -> Result<File> {
    let cpath = std::ffi::CString::new(path).map_err(|err| Error::DeviceInit(err.to_string()))?;
    let fd = unsafe { libc::open(cpath.as_ptr(), libc::O_RDONLY) };
    if fd < 0 {
        return Err(Error::Io(std::io::Error::last_os_error()));
    }
    Ok(unsafe { File::from_raw_fd(fd) })
}

fn grab(file: &File) -> Result<()> {
    let rv = unsafe { libc::ioctl(file.as_raw_fd(), EVIOCGRAB, 1) };
    if rv == -1 {
        return Err(Error::DeviceGrab(std::io::Error::last_os_error().to_string()));
    }
    Ok(())
}

fn ungrab(file: &File) {
    unsafe {
        libc::ioctl(file.as_raw_fd(), EVIOCGRAB, 0);
    }
}

pub struct DeviceProvider {
    source: Device,
    source_file: File,
    mirror: UInputDevice,
}

impl DeviceProvider {
    pub fn open(device_path: &str, mirror_name: &str) -> Result<Self> {
        let file = open_dev(device_path)?;
        grab(&file)?;

        let clone = file.try_clone()?;
        let source = Device::new_from_file(clone).map_err(|err| Error::DeviceInit(err.to_string()))?;

        let mut uninit = UninitDevice::new().ok_or_else(|| Error::DeviceInit("uinput device alloc failed".into()))?;
        uninit.set_name(mirror_name);
        enable_mirrored_events(&mut uninit)?;
        let mirror = UInputDevice::create_from_device(&uninit).map_err(|err| Error::DeviceInit(err.to_string()))?;

        Ok(Self {
            source,
            source_file: file,
            mirror,
        })
    }
}

impl Drop for DeviceProvider {
    fn drop(&mut self) {
        ungrab(&self.source_file);
    }
}

fn enable_mirrored_events(dev: &mut UninitDevice) -> Result<()> {
    dev.enable(&EventType::EV_KEY)
        .map_err(|err| Error::DeviceInit(err.to_string()))?;
    for code in 0u32..256 {
        if let Some(key) = int_to_ev_key(code) {
            dev.enable(&EventCode::EV_KEY(key))
                .map_err(|err| Error::DeviceInit(err.to_string()))?;
        }
    }
    dev.enable(&EventType::EV_REL)
        .map_err(|err| Error::DeviceInit(err.to_string()))?;
    for rel in [EV_REL::REL_X, EV_REL::REL_Y, EV_REL::REL_WHEEL, EV_REL::REL_HWHEEL, EV_REL::REL_DIAL] {
        dev.enable(&EventCode::EV_REL(rel))
            .map_err(|err| Error::DeviceInit(err.to_string()))?;
    }
    Ok(())
}

fn to_timeval() -> TimeVal {
    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
    TimeVal::new(now.as_secs() as i64, now.subsec_micros() as i64)
}

fn event_to_input_event(event: Event) -> Option<InputEvent> {
    let code = match event.kind {
        kind if kind == KIND_KEY => EventCode::EV_KEY(int_to_ev_key(event.code as u32)?),
        kind if kind == KIND_SYN => EventCode::EV_SYN(match event.code {
            0 => EV_SYN::SYN_REPORT,
            3 => EV_SYN::SYN_DROPPED,
            _ => return None,
        }),
        kind if kind == KIND_REL => EventCode::EV_REL(match event.code {
            0x00 => EV_REL::REL_X,
            0x01 => EV_REL::REL_Y,
            0x06 => EV_REL::REL_HWHEEL,
            0x07 => EV_REL::REL_DIAL,
            0x08 => EV_REL::REL_WHEEL,
            _ => return None,
        }),
        kind if kind == KIND_MSC => EventCode::EV_MSC(match event.code {
            4 => EV_MSC::MSC_SCAN,
            _ => return None,
        }),
        _ => return None,
    };
    Some(InputEvent::new(&to_timeval(), &code, event.value))
}

fn input_event_to_event(input_event: &InputEvent) -> Option<Event> {
    let timeval = &input_event.time;
    let (kind, code) = match &input_event.event_code {
        EventCode::EV_KEY(key) => (KIND_KEY, *key as u16),
        EventCode::EV_SYN(EV_SYN::SYN_REPORT) => (KIND_SYN, 0u16),
        EventCode::EV_SYN(EV_SYN::SYN_DROPPED) => (KIND_SYN, 3u16),
        EventCode::EV_REL(rel) => (KIND_REL, *rel as u16),
        EventCode::EV_MSC(EV_MSC::MSC_SCAN) => (KIND_MSC, 4u16),
        _ => return None,
    };
    Some(Event {
        time_sec: timeval.tv_sec as u32,
        time_us: timeval.tv_usec as u32,
        kind,
        code,
        value: input_event.value,
    })
}

impl EventProvider for DeviceProvider {
    fn read_event(&mut self, _timeout_ms: u32) -> Option<Event> {
        loop {
            match self.source.next_event(ReadFlag::NORMAL) {
                Ok((_, input_event)) => {
                    if let Some(event) = input_event_to_event(&input_event) {
                        return Some(event);
                    }
                    // unrecognized event kind/code: drop and keep reading
                }
                Err(err) if err.raw_os_error() == Some(libc::ENODEV) => return None,
                Err(err) => {
                    log::error!("read error on source device: {err}");
                    std::process::exit(1);
                }
            }
        }
    }

    fn write_event(&mut self, event: Event) {
        let Some(input_event) = event_to_input_event(event) else {
            return;
        };
        if let Err(err) = self.mirror.write_event(&input_event) {
            log::error!("write error on uinput mirror: {err}");
            std::process::exit(1);
        }
    }
}
