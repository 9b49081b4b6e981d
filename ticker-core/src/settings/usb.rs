//! USB mass-storage exposure of the settings filesystem
//!
//! While exposed, the host owns the filesystem and the firmware must not
//! read or write settings. The connection state is changed only by this
//! type's own lifecycle calls and the plug callbacks routed to it.

/// Connection state of the settings drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UsbConnection {
    /// Not exposed
    #[default]
    Idle,
    /// Exposed, host has not mounted it yet
    Exposed,
    /// Host has the drive mounted
    Plugged,
    /// Host ejected the drive; settings may have changed
    Ejected,
}

/// The settings filesystem as seen over USB
#[derive(Debug, Default)]
pub struct UsbDrive {
    connection: UsbConnection,
}

impl UsbDrive {
    /// Create a drive that is not exposed
    pub const fn new() -> Self {
        Self {
            connection: UsbConnection::Idle,
        }
    }

    /// Expose the filesystem to the host
    pub fn start(&mut self) {
        if self.connection == UsbConnection::Idle {
            info!("Exposing settings drive over USB");
            self.connection = UsbConnection::Exposed;
        }
    }

    /// Stop exposing the filesystem
    pub fn stop(&mut self) {
        if self.connection != UsbConnection::Idle {
            info!("Settings drive stopped");
        }
        self.connection = UsbConnection::Idle;
    }

    /// Host mounted the drive
    pub fn on_plug(&mut self) {
        match self.connection {
            UsbConnection::Exposed | UsbConnection::Ejected => {
                info!("USB plugged in");
                self.connection = UsbConnection::Plugged;
            }
            UsbConnection::Idle | UsbConnection::Plugged => {
                debug!("Ignoring USB plug while not waiting for host");
            }
        }
    }

    /// Host ejected or unplugged the drive
    pub fn on_unplug(&mut self) {
        if self.connection == UsbConnection::Plugged {
            info!("USB unplugged");
            self.connection = UsbConnection::Ejected;
        }
    }

    /// Current connection state
    pub fn connection(&self) -> UsbConnection {
        self.connection
    }

    /// Check whether the host may still be using the filesystem
    pub fn is_connected(&self) -> bool {
        matches!(
            self.connection,
            UsbConnection::Exposed | UsbConnection::Plugged
        )
    }
}
