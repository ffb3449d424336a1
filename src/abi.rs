// Typed ABI for the deployed CrowdFunding contract
//
// One call struct per entry point; argument order is fixed by the type.

use alloy_sol_types::sol;

sol! {
    /// Campaign record as stored on chain.
    #[sol(all_derives)]
    struct Campaign {
        address owner;
        string title;
        string description;
        uint256 target;
        uint256 deadline;
        uint256 amountCollected;
        string image;
        address[] donators;
        uint256[] donations;
    }

    function createCampaign(
        address owner,
        string memory title,
        string memory description,
        uint256 target,
        uint256 deadline,
        string memory image
    ) external returns (uint256 id);

    function donateToCampaign(uint256 id) external payable;

    function getCampaigns() external view returns (Campaign[] memory campaigns);

    function getCampaignById(uint256 id) external view returns (Campaign memory campaign);

    function campaignCount() external view returns (uint256 count);

    function getDonators(uint256 id) external view returns (address[] memory donators, uint256[] memory donations);
}
