// Compound V3 (Comet), ERC-20 and WETH contract interfaces
use alloy::sol;

// Only the surface the actions touch. `getAssetInfo` returns the uint64
// factor layout deployed on Base.
sol! {
    interface IComet {
        struct AssetInfo {
            uint8 offset;
            address asset;
            address priceFeed;
            uint64 scale;
            uint64 borrowCollateralFactor;
            uint64 liquidateCollateralFactor;
            uint64 liquidationFactor;
            uint128 supplyCap;
        }

        function supply(address asset, uint256 amount) external;
        function withdraw(address asset, uint256 amount) external;

        function getPrice(address priceFeed) external view returns (uint256);
        function borrowBalanceOf(address account) external view returns (uint256);
        function numAssets() external view returns (uint8);
        function getAssetInfo(uint8 i) external view returns (AssetInfo memory);
        function baseToken() external view returns (address);
        function baseTokenPriceFeed() external view returns (address);
        function collateralBalanceOf(address account, address asset) external view returns (uint128);
    }

    interface IERC20 {
        function symbol() external view returns (string memory);
        function balanceOf(address account) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }

    interface IWETH {
        function deposit() external payable;
        function withdraw(uint256 wad) external;
        function balanceOf(address account) external view returns (uint256);
    }
}
